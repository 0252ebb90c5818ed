// SPDX-License-Identifier: GPL-3.0-only

//! Listener contract for capture intents

use serde::{Deserialize, Serialize};

/// A semantic intent emitted by the capture control
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ControlEvent {
    TakePhoto,
    BeginRecording,
    EndRecording,
    FocusChanged { focus: f64 },
    ChangeCamera,
    ClickBack,
    Exit,
    Complete,
}

/// Consumer of capture intents
///
/// Every call is a synchronous notification. The control holds the
/// listener weakly, so implementations usually own the control (or the
/// screen that does) and use interior mutability for their own state.
///
/// Implementations must not call back into the control from inside a
/// notification; queue the work (for example `show_complete_animation`)
/// and run it once the current input has been handled.
pub trait CaptureControlListener {
    fn did_take_photo(&self);
    fn begin_recording(&self);
    fn end_recording(&self);
    fn did_change_focus(&self, focus: f64);
    fn did_change_camera(&self);
    fn did_click_back(&self);
    fn did_exit(&self);
    fn did_complete(&self);
}

/// Route `event` to the matching listener method
pub fn dispatch(listener: &dyn CaptureControlListener, event: ControlEvent) {
    match event {
        ControlEvent::TakePhoto => listener.did_take_photo(),
        ControlEvent::BeginRecording => listener.begin_recording(),
        ControlEvent::EndRecording => listener.end_recording(),
        ControlEvent::FocusChanged { focus } => listener.did_change_focus(focus),
        ControlEvent::ChangeCamera => listener.did_change_camera(),
        ControlEvent::ClickBack => listener.did_click_back(),
        ControlEvent::Exit => listener.did_exit(),
        ControlEvent::Complete => listener.did_complete(),
    }
}

/// Listener that appends every event to a shared log
///
/// Used by the hosts in this crate, which react to intents after the
/// control has finished handling the input that produced them.
#[derive(Debug, Default)]
pub struct EventLog {
    events: std::cell::RefCell<Vec<ControlEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far
    pub fn drain(&self) -> Vec<ControlEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn snapshot(&self) -> Vec<ControlEvent> {
        self.events.borrow().clone()
    }

    fn push(&self, event: ControlEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl CaptureControlListener for EventLog {
    fn did_take_photo(&self) {
        self.push(ControlEvent::TakePhoto);
    }

    fn begin_recording(&self) {
        self.push(ControlEvent::BeginRecording);
    }

    fn end_recording(&self) {
        self.push(ControlEvent::EndRecording);
    }

    fn did_change_focus(&self, focus: f64) {
        self.push(ControlEvent::FocusChanged { focus });
    }

    fn did_change_camera(&self) {
        self.push(ControlEvent::ChangeCamera);
    }

    fn did_click_back(&self) {
        self.push(ControlEvent::ClickBack);
    }

    fn did_exit(&self) {
        self.push(ControlEvent::Exit);
    }

    fn did_complete(&self) {
        self.push(ControlEvent::Complete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_routes_every_event() {
        let log = EventLog::new();
        let events = [
            ControlEvent::TakePhoto,
            ControlEvent::BeginRecording,
            ControlEvent::EndRecording,
            ControlEvent::FocusChanged { focus: 12.5 },
            ControlEvent::ChangeCamera,
            ControlEvent::ClickBack,
            ControlEvent::Exit,
            ControlEvent::Complete,
        ];
        for event in events {
            dispatch(&log, event);
        }
        assert_eq!(log.drain(), events.to_vec());
        assert!(log.snapshot().is_empty());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&ControlEvent::FocusChanged { focus: 5.0 }).unwrap();
        assert_eq!(json, r#"{"event":"focus_changed","focus":5.0}"#);
        let json = serde_json::to_string(&ControlEvent::TakePhoto).unwrap();
        assert_eq!(json, r#"{"event":"take_photo"}"#);
    }
}
