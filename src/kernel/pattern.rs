//! Pattern: one labelled training example.

use crate::values::Values;
use std::collections::HashSet;

/// A learned example: inputs, target outputs, and whether it is held out
/// from weight updates.
///
/// Patterns are immutable once created. Held-out patterns are still
/// propagated every epoch; their error feeds the overfitting detector
/// instead of the weights.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    inputs: Values,
    outputs: Values,
    held_out: bool,
}

impl Pattern {
    /// Create a pattern that takes part in weight updates.
    pub fn new(inputs: Values, outputs: Values) -> Self {
        Self {
            inputs,
            outputs,
            held_out: false,
        }
    }

    /// Create a pattern reserved for measuring generalisation error.
    pub fn held_out(inputs: Values, outputs: Values) -> Self {
        Self {
            inputs,
            outputs,
            held_out: true,
        }
    }

    pub fn inputs(&self) -> &Values {
        &self.inputs
    }

    pub fn outputs(&self) -> &Values {
        &self.outputs
    }

    pub fn is_held_out(&self) -> bool {
        self.held_out
    }
}

/// Distinct keys across a sequence of mappings, in first-seen order.
pub fn distinct_keys<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Values>,
{
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for v in values {
        for key in v.keys() {
            if seen.insert(key) {
                keys.push(key.to_string());
            }
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_keys_first_seen_order() {
        let a = Values::from([("x", 0.1), ("y", 0.2)]);
        let b = Values::from([("z", 0.3), ("x", 0.4)]);
        let c = Values::from([("y", 0.5), ("w", 0.6)]);

        let keys = distinct_keys([&a, &b, &c]);
        assert_eq!(keys, vec!["x", "y", "z", "w"]);
    }

    #[test]
    fn test_held_out_flag() {
        let p = Pattern::new(Values::from(0.1), Values::from(0.9));
        assert!(!p.is_held_out());

        let q = Pattern::held_out(Values::from(0.1), Values::from(0.9));
        assert!(q.is_held_out());
        assert_eq!(q.outputs().get("0"), Some(0.9));
    }
}
