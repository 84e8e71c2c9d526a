//! Time sources for slice and run budgets.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A monotonic time source.
///
/// Only differences between readings are meaningful.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Deterministic clock that advances by a fixed tick on every reading.
///
/// Clones share the same time, so a test can keep a handle and
/// [`advance`](ManualClock::advance) it while a learner owns another.
///
/// ```rust
/// use neurite::training::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new(Duration::from_millis(1));
/// assert_eq!(clock.now(), Duration::ZERO);
/// assert_eq!(clock.now(), Duration::from_millis(1));
/// ```
#[derive(Clone, Debug)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
    tick: u64,
}

impl ManualClock {
    /// A zero tick is raised to one nanosecond: a clock that never moves
    /// would keep a training slice running forever.
    pub fn new(tick: Duration) -> Self {
        Self {
            nanos: Arc::new(AtomicU64::new(0)),
            tick: (tick.as_nanos() as u64).max(1),
        }
    }

    /// Jump forward without taking a reading.
    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Current time without ticking.
    pub fn peek(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.fetch_add(self.tick, Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_ticks() {
        let clock = ManualClock::new(Duration::from_micros(10));
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.now(), Duration::from_micros(10));
        assert_eq!(clock.peek(), Duration::from_micros(20));
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(Duration::from_nanos(1));
        let handle = clock.clone();
        handle.advance(Duration::from_secs(2));
        assert_eq!(clock.now(), Duration::from_secs(2));
        assert_eq!(handle.peek(), Duration::from_secs(2) + Duration::from_nanos(1));
    }

    #[test]
    fn test_manual_clock_zero_tick_still_advances() {
        let clock = ManualClock::new(Duration::ZERO);
        let a = clock.now();
        let b = clock.now();
        assert!(b > a);
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
