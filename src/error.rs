//! Error types for neurite.

use thiserror::Error;

/// Neurite error types.
#[derive(Error, Debug)]
pub enum NeuriteError {
    /// A learning or guessing value outside [0, 1] (or not a finite number)
    #[error("Invalid value for key {key:?}: {value} (expected a number between 0 and 1)")]
    InvalidValue { key: String, value: f64 },

    /// Training requested before any pattern was learned
    #[error("No data: learn() some patterns first")]
    NoData,

    /// Rejected configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Result type alias for neurite operations.
pub type Result<T> = std::result::Result<T, NeuriteError>;
