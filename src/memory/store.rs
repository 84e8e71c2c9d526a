//! Pattern store: every example the learner has been taught.
//!
//! The store decides at insertion time whether a pattern is held out. Once
//! more than [`HOLDOUT_MIN_PATTERNS`] patterns are stored, every pattern
//! arriving while the store size is a multiple of [`HOLDOUT_EVERY`] is held
//! out, which keeps roughly a third of later patterns for measuring
//! generalisation error.

use crate::kernel::Pattern;
use crate::values::Values;
use rand::seq::SliceRandom;
use rand::Rng;

/// No pattern is held out until the store holds more than this many.
pub const HOLDOUT_MIN_PATTERNS: usize = 10;

/// Hold out a pattern whenever the store size is a multiple of this.
pub const HOLDOUT_EVERY: usize = 3;

/// Ordered collection of learned patterns.
#[derive(Clone, Debug, Default)]
pub struct PatternStore {
    patterns: Vec<Pattern>,
}

impl PatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new example and return a reference to it.
    ///
    /// The hold-out decision is made here, from the size of the store
    /// before insertion.
    pub fn push(&mut self, inputs: Values, outputs: Values) -> &Pattern {
        let n = self.patterns.len();
        let pattern = if n > HOLDOUT_MIN_PATTERNS && n % HOLDOUT_EVERY == 0 {
            Pattern::held_out(inputs, outputs)
        } else {
            Pattern::new(inputs, outputs)
        };
        self.patterns.push(pattern);
        &self.patterns[n]
    }

    /// Uniformly permute the stored patterns.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.patterns.shuffle(rng);
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of held-out patterns.
    pub fn held_out_count(&self) -> usize {
        self.patterns.iter().filter(|p| p.is_held_out()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fill(n: usize) -> PatternStore {
        let mut store = PatternStore::new();
        for i in 0..n {
            store.push(Values::from(i as f64 / n as f64), Values::from(0.5));
        }
        store
    }

    #[test]
    fn test_no_holdout_for_small_stores() {
        let store = fill(11);
        assert_eq!(store.len(), 11);
        assert_eq!(store.held_out_count(), 0);
    }

    #[test]
    fn test_holdout_every_third_after_ten() {
        let store = fill(20);
        let held: Vec<usize> = store
            .patterns()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_held_out())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(held, vec![12, 15, 18]);
    }

    #[test]
    fn test_shuffle_keeps_patterns() {
        let mut store = fill(30);
        let mut before: Vec<f64> = store
            .patterns()
            .iter()
            .map(|p| p.inputs().get("0").unwrap())
            .collect();

        store.shuffle(&mut ChaCha8Rng::seed_from_u64(5));
        let mut after: Vec<f64> = store
            .patterns()
            .iter()
            .map(|p| p.inputs().get("0").unwrap())
            .collect();

        assert_eq!(store.held_out_count(), 6);
        before.sort_by(f64::total_cmp);
        after.sort_by(f64::total_cmp);
        assert_eq!(before, after);
    }
}
