// SPDX-License-Identifier: GPL-3.0-only

//! Cosmetic transforms and their animations
//!
//! These never influence the state machine. Renderers sample them with the
//! current time.

use super::geometry::Layout;
use crate::constants::{timing, ui};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in 0..=1 onto the curve
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            // Smoothstep, symmetric around the midpoint
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// A value moving from `from` to `to` over `duration`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub started_at: Instant,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    pub fn value_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }
}

/// An animatable scalar: either resting or tweening
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animated {
    Still(f64),
    Moving(Tween),
}

impl Animated {
    pub fn value_at(&self, now: Instant) -> f64 {
        match self {
            Animated::Still(value) => *value,
            Animated::Moving(tween) => tween.value_at(now),
        }
    }

    /// Final value once any running animation completes
    pub fn target(&self) -> f64 {
        match self {
            Animated::Still(value) => *value,
            Animated::Moving(tween) => tween.to,
        }
    }

    /// Start a tween from wherever the value is right now
    pub fn animate_to(&mut self, to: f64, now: Instant, duration: Duration, easing: Easing) {
        *self = Animated::Moving(Tween {
            from: self.value_at(now),
            to,
            started_at: now,
            duration,
            easing,
        });
    }

    /// Jump to `value`, dropping any running animation
    pub fn snap(&mut self, value: f64) {
        *self = Animated::Still(value);
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        matches!(self, Animated::Moving(tween) if !tween.is_finished(now))
    }
}

/// All cosmetic transforms of the control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transforms {
    pub shutter_scale: Animated,
    pub center_dot_scale: Animated,
    /// Horizontal origin of the retake button
    pub retake_x: Animated,
    /// Horizontal origin of the confirm button
    pub confirm_x: Animated,
}

impl Transforms {
    pub fn new(layout: &Layout) -> Self {
        let rest = layout.post_capture_rest().x();
        Self {
            shutter_scale: Animated::Still(1.0),
            center_dot_scale: Animated::Still(1.0),
            retake_x: Animated::Still(rest),
            confirm_x: Animated::Still(rest),
        }
    }

    /// Grow the shutter and shrink the inner dot
    pub fn play_recording_scale(&mut self, now: Instant) {
        let duration = timing::RECORDING_SCALE_ANIMATION;
        self.shutter_scale
            .animate_to(ui::RECORDING_SHUTTER_SCALE, now, duration, Easing::EaseInOut);
        self.center_dot_scale
            .animate_to(ui::RECORDING_DOT_SCALE, now, duration, Easing::EaseInOut);
    }

    pub fn reset_scale(&mut self) {
        self.shutter_scale.snap(1.0);
        self.center_dot_scale.snap(1.0);
    }

    /// Slide retake and confirm out to their revealed positions
    pub fn play_complete(&mut self, layout: &Layout, now: Instant) {
        let duration = timing::COMPLETE_ANIMATION;
        self.retake_x
            .animate_to(layout.retake_revealed_x, now, duration, Easing::EaseInOut);
        self.confirm_x
            .animate_to(layout.confirm_revealed_x, now, duration, Easing::EaseInOut);
    }

    /// Park retake and confirm back behind the shutter
    pub fn reset_post_capture(&mut self, layout: &Layout) {
        let rest = layout.post_capture_rest().x();
        self.retake_x.snap(rest);
        self.confirm_x.snap(rest);
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.shutter_scale.is_animating(now)
            || self.center_dot_scale.is_animating(now)
            || self.retake_x.is_animating(now)
            || self.confirm_x.is_animating(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::geometry::Rect;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
        assert!(Easing::EaseInOut.apply(0.25) < 0.25);
    }

    #[test]
    fn test_tween_progression() {
        let start = Instant::now();
        let tween = Tween {
            from: 1.0,
            to: 1.5,
            started_at: start,
            duration: Duration::from_millis(200),
            easing: Easing::Linear,
        };
        assert_eq!(tween.value_at(start), 1.0);
        assert!((tween.value_at(start + Duration::from_millis(100)) - 1.25).abs() < 1e-9);
        assert_eq!(tween.value_at(start + Duration::from_secs(1)), 1.5);
        assert!(tween.is_finished(start + Duration::from_millis(200)));
    }

    #[test]
    fn test_recording_scale_then_reset() {
        let layout = Layout::new(Rect::new(0.0, 0.0, 375.0, 150.0), 80.0);
        let mut transforms = Transforms::new(&layout);
        let now = Instant::now();

        transforms.play_recording_scale(now);
        assert!(transforms.is_animating(now));
        let done = now + timing::RECORDING_SCALE_ANIMATION;
        assert_eq!(transforms.shutter_scale.value_at(done), 1.5);
        assert_eq!(transforms.center_dot_scale.value_at(done), 0.5);

        transforms.reset_scale();
        assert_eq!(transforms.shutter_scale, Animated::Still(1.0));
        assert_eq!(transforms.center_dot_scale, Animated::Still(1.0));
    }

    #[test]
    fn test_complete_slide_targets() {
        let layout = Layout::new(Rect::new(0.0, 0.0, 375.0, 150.0), 80.0);
        let mut transforms = Transforms::new(&layout);
        assert_eq!(transforms.retake_x.target(), layout.shutter.x());

        transforms.play_complete(&layout, Instant::now());
        assert_eq!(transforms.retake_x.target(), 50.0);
        assert_eq!(transforms.confirm_x.target(), 245.0);

        transforms.reset_post_capture(&layout);
        assert_eq!(transforms.confirm_x, Animated::Still(layout.shutter.x()));
    }
}
