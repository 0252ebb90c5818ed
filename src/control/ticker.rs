// SPDX-License-Identifier: GPL-3.0-only

//! Recording progress ticker
//!
//! The ticker is an owned [`RepeatingTask`] driven by a [`Clock`]. Hosts poll
//! it from their event loop; tests and the script replayer use a
//! [`ManualClock`] so ticks happen deterministically.

use super::state::RecordTime;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
///
/// Clones share the same time, so a test can keep one handle and give the
/// other to the control.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// A scheduled, cancellable repeating callback
///
/// Owning the value means the task is live; dropping it cancels it and no
/// further tick is reported.
#[derive(Debug)]
pub struct RepeatingTask {
    period: Duration,
    next_due: Instant,
}

impl RepeatingTask {
    /// Schedule the first tick one `period` after `now`
    pub fn start(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Consume one due tick, if any
    ///
    /// Only one tick is returned per call so the caller can stop between
    /// ticks that were overdue at the same time.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        true
    }
}

/// Result of one progress tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Ring should show this fraction (0..=1)
    Progress(f64),
    /// Recording ran past the limit and must stop
    LimitExceeded,
}

pub fn tick_outcome(record_time: RecordTime, limit: Duration) -> TickOutcome {
    let progress = record_time.progress(limit);
    if progress > 1.0 {
        TickOutcome::LimitExceeded
    } else {
        TickOutcome::Progress(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_fires_once_per_period() {
        let clock = ManualClock::new();
        let mut task = RepeatingTask::start(Duration::from_millis(10), clock.now());

        assert!(!task.poll(clock.now()));
        clock.advance(Duration::from_millis(9));
        assert!(!task.poll(clock.now()));
        clock.advance(Duration::from_millis(1));
        assert!(task.poll(clock.now()));
        assert!(!task.poll(clock.now()));
    }

    #[test]
    fn test_overdue_ticks_drain_one_at_a_time() {
        let clock = ManualClock::new();
        let mut task = RepeatingTask::start(Duration::from_millis(10), clock.now());
        clock.advance(Duration::from_millis(35));

        let mut fired = 0;
        while task.poll(clock.now()) {
            fired += 1;
        }
        assert_eq!(fired, 3);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = other.now();
        clock.advance(Duration::from_secs(2));
        assert_eq!(other.now() - start, Duration::from_secs(2));
    }

    #[test]
    fn test_tick_outcome_boundary() {
        let limit = Duration::from_secs(1);
        let mut time = RecordTime::ZERO;
        for _ in 0..100 {
            time.advance();
        }
        assert_eq!(tick_outcome(time, limit), TickOutcome::Progress(1.0));
        time.advance();
        assert_eq!(tick_outcome(time, limit), TickOutcome::LimitExceeded);
    }
}
