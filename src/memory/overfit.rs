//! Overfitting detection over held-out pattern errors.
//!
//! Every time a held-out pattern is measured its MSE is [`record`]ed. With
//! `n` patterns in the store, the tracker compares the newest `n` samples
//! against the `n` before them: if the newer window sums higher, error on
//! data the network never trains on is rising, and training should stop.
//!
//! [`record`]: OverfitTracker::record

use std::collections::VecDeque;

/// Sliding window of held-out MSE samples.
#[derive(Clone, Debug, Default)]
pub struct OverfitTracker {
    samples: VecDeque<f64>,
}

impl OverfitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a held-out pattern's MSE.
    pub fn record(&mut self, mse: f64) {
        self.samples.push_back(mse);
    }

    /// Whether the held-out error trend is rising, for a store of
    /// `pattern_count` patterns.
    ///
    /// Needs at least `2 * pattern_count` samples; until then this is
    /// `false`. Samples older than the newest `2 * pattern_count` are
    /// discarded.
    pub fn is_overfitting(&mut self, pattern_count: usize) -> bool {
        let window = pattern_count;
        if window == 0 || self.samples.len() < window * 2 {
            return false;
        }

        let excess = self.samples.len() - window * 2;
        self.samples.drain(..excess);

        let older: f64 = self.samples.iter().take(window).sum();
        let newer: f64 = self.samples.iter().skip(window).sum();
        newer > older
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop every recorded sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_assessable_before_two_windows() {
        let mut tracker = OverfitTracker::new();
        for i in 0..5 {
            tracker.record(i as f64);
            assert!(!tracker.is_overfitting(3));
        }
        tracker.record(5.0);
        assert!(tracker.is_overfitting(3));
    }

    #[test]
    fn test_trims_to_newest_two_windows() {
        let mut tracker = OverfitTracker::new();
        for s in [9.0, 9.0, 9.0, 1.0, 1.0, 2.0, 2.0] {
            tracker.record(s);
        }
        // window 2 keeps [1, 1, 2, 2]: newer 4 > older 2
        assert!(tracker.is_overfitting(2));
        assert_eq!(tracker.len(), 4);
    }

    #[test]
    fn test_falling_error_is_not_overfitting() {
        let mut tracker = OverfitTracker::new();
        for s in [0.4, 0.3, 0.2, 0.1] {
            tracker.record(s);
        }
        assert!(!tracker.is_overfitting(2));
        // equal windows do not count either
        let mut flat = OverfitTracker::new();
        for _ in 0..4 {
            flat.record(0.2);
        }
        assert!(!flat.is_overfitting(2));
    }

    #[test]
    fn test_deterministic_for_same_sequence() {
        let seq = [0.3, 0.1, 0.25, 0.2, 0.22, 0.4, 0.05, 0.5];
        let run = || {
            let mut t = OverfitTracker::new();
            seq.iter()
                .map(|&s| {
                    t.record(s);
                    t.is_overfitting(3)
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
        assert!(!run()[..5].iter().any(|&b| b));
    }

    #[test]
    fn test_empty_store_never_overfits() {
        let mut tracker = OverfitTracker::new();
        tracker.record(1.0);
        assert!(!tracker.is_overfitting(0));
        tracker.clear();
        assert!(tracker.is_empty());
    }
}
