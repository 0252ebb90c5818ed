// SPDX-License-Identifier: GPL-3.0-only

//! Capture control state machine

use crate::constants::timing;
use serde::Serialize;
use std::time::Duration;

/// Interaction state of the capture control
///
/// ```text
/// Idle --tap--> Captured
/// Idle --long press began--> Recording --end / limit--> Captured
/// Captured --retake--> Idle
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ControlState {
    /// Shutter, switch-camera and exit are visible and accept input
    #[default]
    Idle,
    /// Long press in progress, the progress ring is filling
    Recording,
    /// A photo or video was produced and awaits retake or confirm
    Captured,
}

/// Which controls are currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub shutter: bool,
    pub switch_camera: bool,
    pub exit: bool,
    pub retake: bool,
    pub confirm: bool,
}

impl Visibility {
    /// Initial arrangement: capture controls shown, post-capture controls hidden
    pub const fn primary() -> Self {
        Self {
            shutter: true,
            switch_camera: true,
            exit: true,
            retake: false,
            confirm: false,
        }
    }

    pub fn set_primary(&mut self, visible: bool) {
        self.shutter = visible;
        self.switch_camera = visible;
        self.exit = visible;
    }

    pub fn set_post_capture(&mut self, visible: bool) {
        self.retake = visible;
        self.confirm = visible;
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::primary()
    }
}

/// Elapsed recording time, counted in whole ticks
///
/// Counting ticks rather than summing floats keeps `n` ticks at exactly
/// `n * 10ms`, so the duration limit trips on the same tick every time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RecordTime {
    ticks: u32,
}

impl RecordTime {
    pub const ZERO: Self = Self { ticks: 0 };

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn advance(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }

    pub fn duration(&self) -> Duration {
        timing::TICK_INTERVAL * self.ticks
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.duration().as_secs_f64()
    }

    /// Fraction of `limit` that has elapsed (not clamped)
    pub fn progress(&self, limit: Duration) -> f64 {
        self.as_secs_f64() / limit.as_secs_f64()
    }
}
