// SPDX-License-Identifier: MPL-2.0

//! Capture Control - shutter button logic for camera capture screens
//!
//! This library provides the capture control found at the bottom of a
//! camera screen: tap the shutter to take a photo, hold it to record a
//! video with a progress ring, then retake or confirm the result.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`control`]: The capture control widget, its state machine and ticker
//! - [`config`]: User configuration handling
//! - [`replay`]: Deterministic replay of timed input scripts
//! - [`terminal`]: Interactive terminal host
//!
//! # Example
//!
//! ```
//! use capture_control::config::ControlConfig;
//! use capture_control::control::{CaptureControl, ControlEvent, EventLog, Gesture, ManualClock};
//! use std::rc::Rc;
//!
//! let config = ControlConfig::default();
//! let mut control = CaptureControl::new(config.frame(), &config, ManualClock::new());
//! let log = Rc::new(EventLog::new());
//! control.set_listener(&log);
//!
//! control.handle_gesture(Gesture::Tap);
//! assert_eq!(log.drain(), vec![ControlEvent::TakePhoto]);
//! ```

pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod replay;
pub mod terminal;

// Re-export commonly used types
pub use config::ControlConfig;
pub use control::{CaptureControl, CaptureControlListener, ControlEvent, ControlState};
pub use errors::{AppError, AppResult};
