// SPDX-License-Identifier: GPL-3.0-only

//! Raw pointer input to tap / long-press gestures
//!
//! Hosts that only see pointer down/move/up (terminals, canvases) feed them
//! here to get the two gesture streams the control expects. Timing follows
//! the usual touch defaults: a press held for the long-press duration
//! without drifting more than 10 points becomes a long press, a shorter
//! press is a tap.

use super::geometry::{Layout, Point};
use super::interpreter::{Gesture, PressPhase};
use crate::constants::timing;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tracking {
    Idle,
    /// Pointer is down, waiting to see whether it becomes a long press
    Pressed { started_at: Instant, origin: Point },
    /// Long press began; moves and release are forwarded
    Holding,
    /// Press drifted too far; ignore everything until release
    Failed,
}

#[derive(Debug, Clone)]
pub struct PressRecognizer {
    long_press_duration: Duration,
    state: Tracking,
}

impl PressRecognizer {
    pub fn new(long_press_duration: Duration) -> Self {
        Self {
            long_press_duration,
            state: Tracking::Idle,
        }
    }

    pub fn is_holding(&self) -> bool {
        self.state == Tracking::Holding
    }

    /// Pointer pressed at widget point `point`
    ///
    /// Only presses inside the (unscaled) shutter are tracked.
    pub fn press(&mut self, layout: &Layout, point: Point, now: Instant) -> bool {
        if !layout.shutter.contains(point) {
            return false;
        }
        self.state = Tracking::Pressed {
            started_at: now,
            origin: point,
        };
        true
    }

    /// Pointer moved while down
    ///
    /// `shutter_scale` is the shutter's current scale, used to report the
    /// location in shutter-local coordinates.
    pub fn drag(
        &mut self,
        layout: &Layout,
        point: Point,
        shutter_scale: f64,
        now: Instant,
    ) -> Option<Gesture> {
        let mut began = None;
        if let Tracking::Pressed { .. } = self.state {
            began = self.poll(layout, now);
        }

        match self.state {
            Tracking::Pressed { origin, .. } => {
                if origin.distance(point) > timing::ALLOWABLE_MOVEMENT {
                    self.state = Tracking::Failed;
                }
                None
            }
            Tracking::Holding if began.is_none() => Some(Gesture::LongPress {
                phase: PressPhase::Changed,
                location: layout.shutter_local(point, shutter_scale),
            }),
            _ => began,
        }
    }

    /// Pointer released
    ///
    /// A press held past the long-press duration that was never polled
    /// still reports its began phase before the end.
    pub fn release(&mut self, layout: &Layout, point: Point, now: Instant) -> Vec<Gesture> {
        let state = std::mem::replace(&mut self.state, Tracking::Idle);
        let ended = Gesture::LongPress {
            phase: PressPhase::Ended,
            location: layout.shutter_local(point, 1.0),
        };
        match state {
            Tracking::Pressed { started_at, origin } => {
                if origin.distance(point) > timing::ALLOWABLE_MOVEMENT {
                    return Vec::new();
                }
                let held = now.saturating_duration_since(started_at);
                if held < self.long_press_duration {
                    vec![Gesture::Tap]
                } else {
                    let began = Gesture::LongPress {
                        phase: PressPhase::Began,
                        location: layout.shutter_local(origin, 1.0),
                    };
                    vec![began, ended]
                }
            }
            Tracking::Holding => vec![ended],
            Tracking::Idle | Tracking::Failed => Vec::new(),
        }
    }

    /// Abandon the current press (focus lost, window resized, ...)
    pub fn cancel(&mut self) -> Option<Gesture> {
        let state = std::mem::replace(&mut self.state, Tracking::Idle);
        match state {
            Tracking::Holding => Some(Gesture::LongPress {
                phase: PressPhase::Cancelled,
                location: Point::default(),
            }),
            _ => None,
        }
    }

    /// Promote a press that has been held long enough
    pub fn poll(&mut self, layout: &Layout, now: Instant) -> Option<Gesture> {
        let Tracking::Pressed { started_at, origin } = self.state else {
            return None;
        };
        if now.saturating_duration_since(started_at) < self.long_press_duration {
            return None;
        }
        self.state = Tracking::Holding;
        Some(Gesture::LongPress {
            phase: PressPhase::Began,
            location: layout.shutter_local(origin, 1.0),
        })
    }
}

impl Default for PressRecognizer {
    fn default() -> Self {
        Self::new(Duration::from_millis(timing::DEFAULT_LONG_PRESS_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::geometry::Rect;

    fn setup() -> (PressRecognizer, Layout, Instant) {
        let layout = Layout::new(Rect::new(0.0, 0.0, 375.0, 150.0), 80.0);
        (PressRecognizer::default(), layout, Instant::now())
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_quick_press_is_tap() {
        let (mut recognizer, layout, start) = setup();
        let center = layout.shutter.center();
        assert!(recognizer.press(&layout, center, start));
        assert_eq!(recognizer.poll(&layout, start + ms(200)), None);
        assert_eq!(
            recognizer.release(&layout, center, start + ms(300)),
            vec![Gesture::Tap]
        );
    }

    #[test]
    fn test_press_outside_shutter_is_ignored() {
        let (mut recognizer, layout, start) = setup();
        assert!(!recognizer.press(&layout, Point::new(5.0, 5.0), start));
        assert!(recognizer.release(&layout, Point::new(5.0, 5.0), start).is_empty());
    }

    #[test]
    fn test_hold_drag_release() {
        let (mut recognizer, layout, start) = setup();
        let center = layout.shutter.center();
        recognizer.press(&layout, center, start);

        let began = recognizer.poll(&layout, start + ms(500));
        assert!(matches!(
            began,
            Some(Gesture::LongPress {
                phase: PressPhase::Began,
                ..
            })
        ));
        assert!(recognizer.is_holding());

        // 20 points above the unscaled top edge
        let above = Point::new(center.x, layout.shutter.y() - 20.0);
        let changed = recognizer.drag(&layout, above, 1.0, start + ms(600));
        match changed {
            Some(Gesture::LongPress {
                phase: PressPhase::Changed,
                location,
            }) => assert!((location.y + 20.0).abs() < 1e-9),
            other => panic!("expected a changed long press, got {other:?}"),
        }

        let ended = recognizer.release(&layout, above, start + ms(700));
        assert!(matches!(
            ended.as_slice(),
            [Gesture::LongPress {
                phase: PressPhase::Ended,
                ..
            }]
        ));
    }

    #[test]
    fn test_drag_promotes_overdue_press() {
        let (mut recognizer, layout, start) = setup();
        let center = layout.shutter.center();
        recognizer.press(&layout, center, start);

        let gesture = recognizer.drag(&layout, center, 1.0, start + ms(800));
        assert!(matches!(
            gesture,
            Some(Gesture::LongPress {
                phase: PressPhase::Began,
                ..
            })
        ));
    }

    #[test]
    fn test_unpolled_long_hold_reports_began_then_ended() {
        let (mut recognizer, layout, start) = setup();
        let center = layout.shutter.center();
        recognizer.press(&layout, center, start);

        let gestures = recognizer.release(&layout, center, start + ms(900));
        assert!(matches!(
            gestures.as_slice(),
            [
                Gesture::LongPress {
                    phase: PressPhase::Began,
                    ..
                },
                Gesture::LongPress {
                    phase: PressPhase::Ended,
                    ..
                }
            ]
        ));
        assert!(!recognizer.is_holding());
    }

    #[test]
    fn test_drift_fails_the_press() {
        let (mut recognizer, layout, start) = setup();
        let center = layout.shutter.center();
        recognizer.press(&layout, center, start);

        let moved = Point::new(center.x + 15.0, center.y);
        assert_eq!(recognizer.drag(&layout, moved, 1.0, start + ms(100)), None);
        assert_eq!(recognizer.poll(&layout, start + ms(600)), None);
        assert!(recognizer.release(&layout, moved, start + ms(700)).is_empty());
    }

    #[test]
    fn test_cancel_only_reports_active_hold() {
        let (mut recognizer, layout, start) = setup();
        assert_eq!(recognizer.cancel(), None);

        recognizer.press(&layout, layout.shutter.center(), start);
        recognizer.poll(&layout, start + ms(500));
        assert!(matches!(
            recognizer.cancel(),
            Some(Gesture::LongPress {
                phase: PressPhase::Cancelled,
                ..
            })
        ));
        assert!(!recognizer.is_holding());
    }
}
