// SPDX-License-Identifier: GPL-3.0-only

//! Headless replay of timed input scripts
//!
//! A script is a JSON array of steps:
//!
//! ```json
//! [
//!   { "at_ms": 0,   "input": { "gesture": { "long_press": { "phase": "began", "location": { "x": 40.0, "y": 40.0 } } } } },
//!   { "at_ms": 120, "input": { "gesture": { "long_press": { "phase": "changed", "location": { "x": 40.0, "y": -5.0 } } } } },
//!   { "at_ms": 500, "input": { "gesture": { "long_press": { "phase": "ended", "location": { "x": 40.0, "y": 40.0 } } } } },
//!   { "at_ms": 900, "input": { "click": "confirm" } }
//! ]
//! ```
//!
//! Time is simulated with a [`ManualClock`] in ticker-sized steps, so the
//! output is identical on every run.

use crate::config::ControlConfig;
use crate::constants::timing;
use crate::control::{
    Button, CaptureControl, ControlEvent, ControlState, EventLog, Gesture, ManualClock,
};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptInput {
    Gesture(Gesture),
    Click(Button),
    /// What a consumer does once its capture output is ready
    ShowComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Milliseconds since the start of the script
    pub at_ms: u64,
    pub input: ScriptInput,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    /// Reveal retake/confirm right after a photo or a finished video
    pub complete_after_capture: bool,
    /// Keep the clock running this long after the last step
    pub tail: Duration,
}

/// One emitted event with its simulated timestamp
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplayRecord {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: ControlEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub records: Vec<ReplayRecord>,
    pub final_state: ControlState,
    pub record_time_ms: u64,
}

pub fn load_script(path: &Path) -> AppResult<Vec<ScriptStep>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::Script(format!("{}: {}", path.display(), e)))?;
    parse_script(&content)
}

pub fn parse_script(content: &str) -> AppResult<Vec<ScriptStep>> {
    let steps: Vec<ScriptStep> = serde_json::from_str(content)?;
    if let Some(pair) = steps.windows(2).find(|pair| pair[1].at_ms < pair[0].at_ms) {
        return Err(AppError::Script(format!(
            "steps must be in time order ({}ms comes after {}ms)",
            pair[1].at_ms, pair[0].at_ms
        )));
    }
    Ok(steps)
}

struct Session {
    clock: ManualClock,
    control: CaptureControl<ManualClock>,
    log: Rc<EventLog>,
    elapsed: Duration,
    options: ReplayOptions,
    records: Vec<ReplayRecord>,
}

impl Session {
    /// Move simulated time to `target`, one ticker period at a time
    fn run_until(&mut self, target: Duration) {
        while self.elapsed < target {
            let step = (target - self.elapsed).min(timing::TICK_INTERVAL);
            self.clock.advance(step);
            self.elapsed += step;
            self.control.poll_timers();
            self.collect();
        }
    }

    fn apply(&mut self, input: ScriptInput) {
        match input {
            ScriptInput::Gesture(gesture) => self.control.handle_gesture(gesture),
            ScriptInput::Click(button) => self.control.click(button),
            ScriptInput::ShowComplete => self.control.show_complete_animation(),
        }
        self.collect();
    }

    fn collect(&mut self) {
        let at_ms = self.elapsed.as_millis() as u64;
        let events = self.log.drain();
        let captured = events
            .iter()
            .any(|e| matches!(e, ControlEvent::TakePhoto | ControlEvent::EndRecording));

        self.records
            .extend(events.into_iter().map(|event| ReplayRecord { at_ms, event }));

        if captured && self.options.complete_after_capture {
            self.control.show_complete_animation();
        }
    }
}

/// Drive a fresh control through `steps`
pub fn replay(
    steps: &[ScriptStep],
    config: &ControlConfig,
    options: ReplayOptions,
) -> AppResult<ReplayReport> {
    config.validate()?;

    let clock = ManualClock::new();
    let mut control = CaptureControl::new(config.frame(), config, clock.clone());
    let log = Rc::new(EventLog::new());
    control.set_listener(&log);

    let mut session = Session {
        clock,
        control,
        log,
        elapsed: Duration::ZERO,
        options,
        records: Vec::new(),
    };

    for step in steps {
        session.run_until(Duration::from_millis(step.at_ms));
        debug!(at_ms = step.at_ms, input = ?step.input, "Replaying step");
        session.apply(step.input);
    }
    let end = session.elapsed + options.tail;
    session.run_until(end);

    Ok(ReplayReport {
        records: session.records,
        final_state: session.control.state(),
        record_time_ms: session.control.record_time().duration().as_millis() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_formats() {
        let steps = parse_script(
            r#"[
                {"at_ms": 0, "input": {"gesture": "tap"}},
                {"at_ms": 10, "input": "show_complete"},
                {"at_ms": 20, "input": {"click": "retake"}},
                {"at_ms": 30, "input": {"gesture": {"long_press": {"phase": "began", "location": {"x": 1.0, "y": 2.0}}}}}
            ]"#,
        )
        .expect("script should parse");
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].input, ScriptInput::Gesture(Gesture::Tap));
        assert_eq!(steps[1].input, ScriptInput::ShowComplete);
        assert_eq!(steps[2].input, ScriptInput::Click(Button::Retake));
    }

    #[test]
    fn test_out_of_order_script_is_rejected() {
        let result = parse_script(
            r#"[
                {"at_ms": 50, "input": {"gesture": "tap"}},
                {"at_ms": 10, "input": {"click": "exit"}}
            ]"#,
        );
        assert!(matches!(result, Err(AppError::Script(_))));
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = ReplayRecord {
            at_ms: 40,
            event: ControlEvent::FocusChanged { focus: 3.0 },
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"at_ms":40,"event":"focus_changed","focus":3.0}"#);
    }
}
