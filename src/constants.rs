// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Default maximum video length in seconds
pub const DEFAULT_VIDEO_LENGTH_SECS: f64 = 15.0;

/// Default shutter button diameter in points
pub const DEFAULT_CAMERA_BUTTON_WIDTH: f64 = 80.0;

/// Default widget frame (a bottom control strip on a phone-sized screen)
pub const DEFAULT_FRAME_WIDTH: f64 = 375.0;
pub const DEFAULT_FRAME_HEIGHT: f64 = 150.0;

/// Name used for the config and cache directories
pub const APP_DIR_NAME: &str = "capture-control";

/// UI geometry constants
pub mod ui {
    /// Inset of the white inner dot from the shutter edge
    pub const CENTER_DOT_INSET: f64 = 10.0;

    /// Distance between the progress ring path and the shutter edge
    pub const RING_INSET: f64 = 2.5;

    /// Progress ring stroke thickness
    pub const RING_STROKE_WIDTH: f64 = 5.0;

    /// Ring color, a light sky blue
    pub const RING_COLOR: (u8, u8, u8) = (61, 172, 247);

    /// Switch-camera and exit buttons are square
    pub const SIDE_BUTTON_SIZE: f64 = 40.0;

    /// Horizontal inset of the switch-camera and exit buttons
    pub const SIDE_BUTTON_INSET: f64 = 50.0;

    /// Horizontal inset the retake and confirm buttons slide to
    pub const POST_CAPTURE_INSET: f64 = 50.0;

    /// Shutter scale while recording
    pub const RECORDING_SHUTTER_SCALE: f64 = 1.5;

    /// Inner dot scale while recording
    pub const RECORDING_DOT_SCALE: f64 = 0.5;

    /// Drag distance below the shutter top edge that still resets focus
    pub const FOCUS_DEAD_ZONE: f64 = 10.0;
}

/// Timing constants
pub mod timing {
    use super::Duration;

    /// Progress ticker period
    pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

    /// Shutter grow animation when recording starts
    pub const RECORDING_SCALE_ANIMATION: Duration = Duration::from_millis(200);

    /// Retake/confirm slide-out animation
    pub const COMPLETE_ANIMATION: Duration = Duration::from_millis(300);

    /// Hold time before a press becomes a long press
    pub const DEFAULT_LONG_PRESS_MS: u64 = 500;

    /// Movement allowed before a press stops being a tap or long press
    pub const ALLOWABLE_MOVEMENT: f64 = 10.0;
}
