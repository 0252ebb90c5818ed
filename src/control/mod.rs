// SPDX-License-Identifier: MPL-2.0

//! Capture control module
//!
//! This module implements the shutter control of a capture screen:
//! - Tap to take a photo, long press to record a video
//! - Progress ring bounded by the maximum video length
//! - Retake / confirm after a capture, switch camera and exit buttons
//!
//! The interaction logic ([`interpreter`], [`ticker`]) is pure and
//! framework-free; [`CaptureControl`] glues it to a clock, cosmetic
//! [`animation`]s and a weakly held [`CaptureControlListener`].

pub mod animation;
pub mod geometry;
pub mod interpreter;
pub mod listener;
pub mod recognizer;
pub mod state;
pub mod ticker;
pub mod widget;

// Re-export for convenience
pub use geometry::{Layout, Point, Rect};
pub use interpreter::{Button, Gesture, PressPhase};
pub use listener::{CaptureControlListener, ControlEvent, EventLog};
pub use recognizer::PressRecognizer;
pub use state::{ControlState, RecordTime, Visibility};
pub use ticker::{Clock, ManualClock, SystemClock};
pub use widget::CaptureControl;
