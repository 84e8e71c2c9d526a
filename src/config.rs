//! Learner configuration.
//!
//! Options can be set through the `with_*` builders or loaded from JSON.
//! Missing keys take their defaults and unknown keys are ignored.
//!
//! # Examples
//!
//! ```
//! use neurite::LearnerConfig;
//!
//! let config = LearnerConfig::from_json(r#"{"hidden_layers": [4, 2], "momentum": 0.2}"#)
//!     .unwrap_or_default();
//!
//! assert_eq!(config.learning_rate, 0.3);
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::{NeuriteError, Result};
pub use crate::kernel::HiddenLayers;

/// Options fixed for the lifetime of a [`Learner`](crate::Learner).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Hidden layer layout
    pub hidden_layers: HiddenLayers,
    /// Step size for weight and bias updates
    pub learning_rate: f64,
    /// Fraction of the previous weight change carried into the next
    pub momentum: f64,
    /// Training stops once an epoch's MSE falls below this
    pub targeted_mse: f64,
    /// Wall-clock budget for a whole training run
    pub max_training_time_ms: u64,
    /// Route held-out patterns to the overfitting detector
    pub overfitting_protection: bool,
    /// Wall-clock budget for one slice between host yields
    pub slice_budget_ms: u64,
    /// Clear held-out error samples whenever a new network is built
    pub reset_overfit_samples_on_rebuild: bool,
    /// Seed for weight initialisation and shuffling (entropy when unset)
    pub seed: Option<u64>,
}

impl LearnerConfig {
    /// Parse from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings training cannot work with.
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("learning_rate", self.learning_rate),
            ("momentum", self.momentum),
            ("targeted_mse", self.targeted_mse),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(NeuriteError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.slice_budget_ms == 0 {
            return Err(NeuriteError::InvalidConfig(
                "slice_budget_ms must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn with_hidden_layers(mut self, hidden_layers: HiddenLayers) -> Self {
        self.hidden_layers = hidden_layers;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_targeted_mse(mut self, targeted_mse: f64) -> Self {
        self.targeted_mse = targeted_mse;
        self
    }

    pub fn with_max_training_time(mut self, max: Duration) -> Self {
        self.max_training_time_ms = max.as_millis() as u64;
        self
    }

    pub fn with_overfitting_protection(mut self, enabled: bool) -> Self {
        self.overfitting_protection = enabled;
        self
    }

    pub fn with_slice_budget(mut self, budget: Duration) -> Self {
        self.slice_budget_ms = budget.as_millis() as u64;
        self
    }

    pub fn with_reset_overfit_samples_on_rebuild(mut self, reset: bool) -> Self {
        self.reset_overfit_samples_on_rebuild = reset;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_training_time(&self) -> Duration {
        Duration::from_millis(self.max_training_time_ms)
    }

    pub fn slice_budget(&self) -> Duration {
        Duration::from_millis(self.slice_budget_ms)
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            hidden_layers: HiddenLayers::Auto,
            learning_rate: 0.3,
            momentum: 0.1,
            targeted_mse: 0.005,
            max_training_time_ms: 1000,
            overfitting_protection: true,
            slice_budget_ms: 50,
            reset_overfit_samples_on_rebuild: false,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = LearnerConfig::from_json("{}").unwrap();
        assert_eq!(config, LearnerConfig::default());
        assert_eq!(config.max_training_time(), Duration::from_secs(1));
        assert_eq!(config.slice_budget(), Duration::from_millis(50));
    }

    #[test]
    fn test_parses_custom_values() {
        let json = r#"{
            "hidden_layers": [6, 3],
            "learning_rate": 0.5,
            "momentum": 0.0,
            "targeted_mse": 0.01,
            "max_training_time_ms": 250,
            "overfitting_protection": false,
            "training_progress_callback": null,
            "seed": 7
        }"#;
        let config = LearnerConfig::from_json(json).unwrap();
        assert_eq!(config.hidden_layers, HiddenLayers::Explicit(vec![6, 3]));
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.momentum, 0.0);
        assert_eq!(config.targeted_mse, 0.01);
        assert_eq!(config.max_training_time_ms, 250);
        assert!(!config.overfitting_protection);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            LearnerConfig::from_json(r#"{"learning_rate": -1.0}"#),
            Err(NeuriteError::InvalidConfig(_))
        ));
        assert!(matches!(
            LearnerConfig::from_json(r#"{"slice_budget_ms": 0}"#),
            Err(NeuriteError::InvalidConfig(_))
        ));
        assert!(matches!(
            LearnerConfig::from_json(r#"{"hidden_layers": "wide"}"#),
            Err(NeuriteError::JsonParse(_))
        ));
    }

    #[test]
    fn test_builders() {
        let config = LearnerConfig::default()
            .with_learning_rate(0.1)
            .with_max_training_time(Duration::from_millis(300))
            .with_slice_budget(Duration::from_millis(5))
            .with_seed(3);
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.max_training_time_ms, 300);
        assert_eq!(config.slice_budget_ms, 5);
        assert!(config.validate().is_ok());
    }
}
