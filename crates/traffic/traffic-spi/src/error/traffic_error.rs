//! Traffic error types

use thiserror::Error;

/// Result type alias for traffic operations
pub type Result<T> = std::result::Result<T, TrafficError>;

/// Errors that can occur while forecasting congestion or allocating timings
///
/// A zero-variance history or an all-zero forecast is never an error; those
/// cases are absorbed by the least-squares fit and the equal-split fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrafficError {
    /// Observation or prediction vector has the wrong number of lanes
    #[error("Shape mismatch: expected {expected} lanes, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Configuration value rejected at construction time
    #[error("Invalid configuration '{name}': {reason}")]
    InvalidConfiguration { name: String, reason: String },

    /// Observation contains values that cannot enter the history
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl TrafficError {
    /// Shorthand for [`TrafficError::InvalidConfiguration`]
    pub fn invalid_config(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Check a vector length against the configured lane count
    pub fn check_shape(expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::ShapeMismatch { expected, actual })
        }
    }
}
