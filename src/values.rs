//! Values: named numeric inputs and outputs.
//!
//! A [`Values`] is an insertion-ordered mapping from key to `f64`. Key order
//! matters: the topology builder names neurons in first-seen order, so the
//! order in which a caller lists keys is the order the network's input and
//! output layers end up in.
//!
//! # Shorthand
//!
//! A bare number is a single-key mapping under the key `"0"`, and a slice of
//! numbers is keyed by position:
//!
//! ```rust
//! use neurite::Values;
//!
//! let single = Values::from(0.5);
//! assert_eq!(single.get("0"), Some(0.5));
//!
//! let pair = Values::from(&[0.0, 1.0][..]);
//! assert_eq!(pair.get("1"), Some(1.0));
//! ```

use crate::error::{NeuriteError, Result};

/// Insertion-ordered key → value mapping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Values {
    entries: Vec<(String, f64)>,
}

impl Values {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    /// Value stored for `key`, if any.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|&(_, v)| v)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that every value is a finite number in `[0, 1]`.
    ///
    /// The first offending entry is reported.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in self.iter() {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(NeuriteError::InvalidValue {
                    key: key.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

impl From<f64> for Values {
    fn from(value: f64) -> Self {
        Values::new().with("0", value)
    }
}

impl From<&[f64]> for Values {
    fn from(values: &[f64]) -> Self {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i.to_string(), v))
            .collect()
    }
}

impl<K: Into<String>, const N: usize> From<[(K, f64); N]> for Values {
    fn from(pairs: [(K, f64); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut values = Values::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut values = Values::new();
        values.insert("b", 0.1);
        values.insert("a", 0.2);
        values.insert("b", 0.3);

        assert_eq!(values.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(values.get("b"), Some(0.3));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_shorthand_keys() {
        assert_eq!(Values::from(0.25).keys().collect::<Vec<_>>(), vec!["0"]);

        let v = Values::from(&[0.1, 0.2, 0.3][..]);
        assert_eq!(v.keys().collect::<Vec<_>>(), vec!["0", "1", "2"]);
        assert_eq!(v.get("2"), Some(0.3));
    }

    #[test]
    fn test_validate_range() {
        assert!(Values::from([("x", 0.0), ("y", 1.0)]).validate().is_ok());

        let err = Values::from([("x", 0.5), ("y", 1.5)]).validate().unwrap_err();
        match err {
            NeuriteError::InvalidValue { key, value } => {
                assert_eq!(key, "y");
                assert_eq!(value, 1.5);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(Values::from(-0.1).validate().is_err());
        assert!(Values::from(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_missing_key() {
        let v = Values::from([("x", 0.5)]);
        assert_eq!(v.get("nope"), None);
        assert!(Values::new().is_empty());
    }
}
