// SPDX-License-Identifier: GPL-3.0-only

//! Gesture and button interpretation
//!
//! [`interpret`] is a pure function from the current state and one input to
//! the next state plus an ordered list of [`Effect`]s. The widget applies the
//! effects; nothing in here touches timers, animations or the listener.

use super::geometry::Point;
use super::listener::ControlEvent;
use super::state::ControlState;
use crate::constants::ui;
use serde::{Deserialize, Serialize};

/// Phase of a long-press gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

/// Gesture delivered by the shutter's recognizers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Tap,
    /// `location` is in shutter-local coordinates: the shutter's top edge
    /// is `y == 0` and points above it are negative.
    LongPress { phase: PressPhase, location: Point },
}

/// Auxiliary buttons around the shutter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    SwitchCamera,
    Exit,
    Retake,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Gesture(Gesture),
    Click(Button),
}

/// What the interpreter needs to know about the widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub state: ControlState,
    pub ticker_active: bool,
    pub retake_visible: bool,
    pub confirm_visible: bool,
    pub switch_camera_visible: bool,
    pub exit_visible: bool,
}

/// Side effect requested by a transition, applied in order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Notify(ControlEvent),
    StartTicker,
    StopTicker,
    HidePrimaryControls,
    ShowPrimaryControls,
    HidePostCaptureControls,
    ResetPostCaptureFrames,
    PlayRecordingScale,
    ResetTransforms,
    ResetProgress,
    ResetRecordTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: ControlState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(state: ControlState) -> Self {
        Self {
            next: state,
            effects: Vec::new(),
        }
    }

    fn to(next: ControlState, effects: Vec<Effect>) -> Self {
        Self { next, effects }
    }

    pub fn is_noop(&self, from: ControlState) -> bool {
        self.next == from && self.effects.is_empty()
    }
}

/// Focus adjustment for a drag at shutter-local `offset_y`
///
/// Upward drags past the top edge ramp linearly with distance; the first
/// ten points below the edge snap back to neutral; anything deeper is
/// ignored.
pub fn focus_for_offset(offset_y: f64) -> Option<f64> {
    if offset_y <= 0.0 {
        Some(offset_y.abs())
    } else if offset_y <= ui::FOCUS_DEAD_ZONE {
        Some(0.0)
    } else {
        None
    }
}

/// Effects that end a recording, shared by gesture end and the duration limit
pub fn end_recording_effects() -> Vec<Effect> {
    vec![
        Effect::StopTicker,
        Effect::HidePrimaryControls,
        Effect::ResetTransforms,
        Effect::ResetProgress,
        Effect::Notify(ControlEvent::EndRecording),
    ]
}

pub fn interpret(snapshot: &Snapshot, input: Input) -> Transition {
    match input {
        Input::Gesture(gesture) => interpret_gesture(snapshot, gesture),
        Input::Click(button) => interpret_click(snapshot, button),
    }
}

fn interpret_gesture(snapshot: &Snapshot, gesture: Gesture) -> Transition {
    let state = snapshot.state;
    match gesture {
        Gesture::Tap => {
            if state != ControlState::Idle {
                return Transition::stay(state);
            }
            Transition::to(
                ControlState::Captured,
                vec![
                    Effect::Notify(ControlEvent::TakePhoto),
                    Effect::HidePrimaryControls,
                ],
            )
        }
        Gesture::LongPress {
            phase: PressPhase::Began,
            ..
        } => {
            // A second began while a ticker runs must not schedule another one
            if state != ControlState::Idle || snapshot.ticker_active {
                return Transition::stay(state);
            }
            Transition::to(
                ControlState::Recording,
                vec![
                    Effect::Notify(ControlEvent::BeginRecording),
                    Effect::StartTicker,
                    Effect::PlayRecordingScale,
                ],
            )
        }
        Gesture::LongPress {
            phase: PressPhase::Changed,
            location,
        } => {
            // A press that outlives the auto-stop keeps reporting focus
            if state == ControlState::Idle {
                return Transition::stay(state);
            }
            match focus_for_offset(location.y) {
                Some(focus) => Transition::to(
                    state,
                    vec![Effect::Notify(ControlEvent::FocusChanged { focus })],
                ),
                None => Transition::stay(state),
            }
        }
        Gesture::LongPress { .. } => {
            if !snapshot.ticker_active {
                return Transition::stay(state);
            }
            Transition::to(ControlState::Captured, end_recording_effects())
        }
    }
}

fn interpret_click(snapshot: &Snapshot, button: Button) -> Transition {
    let state = snapshot.state;
    match button {
        Button::SwitchCamera if snapshot.switch_camera_visible => Transition::to(
            state,
            vec![Effect::Notify(ControlEvent::ChangeCamera)],
        ),
        Button::Exit if snapshot.exit_visible => {
            Transition::to(state, vec![Effect::Notify(ControlEvent::Exit)])
        }
        Button::Retake if snapshot.retake_visible => Transition::to(
            ControlState::Idle,
            vec![
                Effect::ShowPrimaryControls,
                Effect::HidePostCaptureControls,
                Effect::ResetPostCaptureFrames,
                Effect::ResetRecordTime,
                Effect::Notify(ControlEvent::ClickBack),
            ],
        ),
        Button::Confirm if snapshot.confirm_visible => {
            Transition::to(state, vec![Effect::Notify(ControlEvent::Complete)])
        }
        _ => Transition::stay(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(state: ControlState) -> Snapshot {
        Snapshot {
            state,
            ticker_active: state == ControlState::Recording,
            retake_visible: false,
            confirm_visible: false,
            switch_camera_visible: state == ControlState::Idle,
            exit_visible: state == ControlState::Idle,
        }
    }

    fn press(phase: PressPhase, y: f64) -> Input {
        Input::Gesture(Gesture::LongPress {
            phase,
            location: Point::new(40.0, y),
        })
    }

    #[test]
    fn test_focus_zones() {
        assert_eq!(focus_for_offset(-5.0), Some(5.0));
        assert_eq!(focus_for_offset(-120.0), Some(120.0));
        assert_eq!(focus_for_offset(0.0), Some(0.0));
        assert_eq!(focus_for_offset(5.0), Some(0.0));
        assert_eq!(focus_for_offset(10.0), Some(0.0));
        assert_eq!(focus_for_offset(10.5), None);
        assert_eq!(focus_for_offset(15.0), None);
    }

    #[test]
    fn test_tap_from_idle() {
        let transition = interpret(&snapshot(ControlState::Idle), Input::Gesture(Gesture::Tap));
        assert_eq!(transition.next, ControlState::Captured);
        assert_eq!(
            transition.effects,
            vec![
                Effect::Notify(ControlEvent::TakePhoto),
                Effect::HidePrimaryControls
            ]
        );
    }

    #[test]
    fn test_tap_ignored_outside_idle() {
        for state in [ControlState::Recording, ControlState::Captured] {
            let transition = interpret(&snapshot(state), Input::Gesture(Gesture::Tap));
            assert!(transition.is_noop(state));
        }
    }

    #[test]
    fn test_began_starts_recording_once() {
        let transition = interpret(&snapshot(ControlState::Idle), press(PressPhase::Began, 20.0));
        assert_eq!(transition.next, ControlState::Recording);
        assert_eq!(
            transition.effects,
            vec![
                Effect::Notify(ControlEvent::BeginRecording),
                Effect::StartTicker,
                Effect::PlayRecordingScale
            ]
        );

        let again = interpret(
            &snapshot(ControlState::Recording),
            press(PressPhase::Began, 20.0),
        );
        assert!(again.is_noop(ControlState::Recording));
    }

    #[test]
    fn test_began_with_stray_ticker_is_ignored() {
        let mut snap = snapshot(ControlState::Idle);
        snap.ticker_active = true;
        assert!(interpret(&snap, press(PressPhase::Began, 0.0)).is_noop(ControlState::Idle));
    }

    #[test]
    fn test_drag_maps_to_focus() {
        let recording = snapshot(ControlState::Recording);
        let up = interpret(&recording, press(PressPhase::Changed, -5.0));
        assert_eq!(
            up.effects,
            vec![Effect::Notify(ControlEvent::FocusChanged { focus: 5.0 })]
        );
        assert_eq!(up.next, ControlState::Recording);

        let edge = interpret(&recording, press(PressPhase::Changed, 5.0));
        assert_eq!(
            edge.effects,
            vec![Effect::Notify(ControlEvent::FocusChanged { focus: 0.0 })]
        );

        let inside = interpret(&recording, press(PressPhase::Changed, 15.0));
        assert!(inside.is_noop(ControlState::Recording));
    }

    #[test]
    fn test_drag_reports_focus_after_capture_but_not_before_press() {
        let captured = interpret(
            &snapshot(ControlState::Captured),
            press(PressPhase::Changed, -8.0),
        );
        assert_eq!(captured.next, ControlState::Captured);
        assert_eq!(
            captured.effects,
            vec![Effect::Notify(ControlEvent::FocusChanged { focus: 8.0 })]
        );

        let idle = interpret(&snapshot(ControlState::Idle), press(PressPhase::Changed, -8.0));
        assert!(idle.is_noop(ControlState::Idle));
    }

    #[test]
    fn test_end_phases_stop_recording() {
        for phase in [PressPhase::Ended, PressPhase::Cancelled, PressPhase::Failed] {
            let transition = interpret(&snapshot(ControlState::Recording), press(phase, 0.0));
            assert_eq!(transition.next, ControlState::Captured);
            assert_eq!(transition.effects, end_recording_effects());
        }
    }

    #[test]
    fn test_end_without_ticker_is_noop() {
        let transition = interpret(&snapshot(ControlState::Captured), press(PressPhase::Ended, 0.0));
        assert!(transition.is_noop(ControlState::Captured));
    }

    #[test]
    fn test_retake_restores_idle() {
        let mut snap = snapshot(ControlState::Captured);
        snap.retake_visible = true;
        snap.confirm_visible = true;

        let transition = interpret(&snap, Input::Click(Button::Retake));
        assert_eq!(transition.next, ControlState::Idle);
        assert_eq!(
            transition.effects.last(),
            Some(&Effect::Notify(ControlEvent::ClickBack))
        );
        assert!(transition.effects.contains(&Effect::ResetRecordTime));

        let confirm = interpret(&snap, Input::Click(Button::Confirm));
        assert_eq!(confirm.next, ControlState::Captured);
        assert_eq!(
            confirm.effects,
            vec![Effect::Notify(ControlEvent::Complete)]
        );
    }

    #[test]
    fn test_hidden_buttons_ignore_clicks() {
        let captured = snapshot(ControlState::Captured);
        for button in [
            Button::SwitchCamera,
            Button::Exit,
            Button::Retake,
            Button::Confirm,
        ] {
            assert!(interpret(&captured, Input::Click(button)).is_noop(ControlState::Captured));
        }

        let idle = snapshot(ControlState::Idle);
        assert_eq!(
            interpret(&idle, Input::Click(Button::SwitchCamera)).effects,
            vec![Effect::Notify(ControlEvent::ChangeCamera)]
        );
        assert_eq!(
            interpret(&idle, Input::Click(Button::Exit)).effects,
            vec![Effect::Notify(ControlEvent::Exit)]
        );
    }
}
