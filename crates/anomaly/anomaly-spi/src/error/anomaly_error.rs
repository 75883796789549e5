//! Anomaly detection error types.

use thiserror::Error;

/// Anomaly detection errors.
///
/// Every variant is recoverable: callers are expected to re-prompt for a
/// valid argument or configuration and try again.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnomalyError {
    /// A generation argument (data type, number of days) is unusable.
    #[error("Invalid argument: {name} - {reason}")]
    InvalidArgument { name: String, reason: String },

    /// A detection configuration is inconsistent or out of range.
    #[error("Invalid configuration: {name} - {reason}")]
    InvalidConfiguration { name: String, reason: String },

    /// A percentage deviation was requested against a zero reference value.
    #[error("Division by zero: {0}")]
    DivisionByZero(String),
}

impl AnomalyError {
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_configuration(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for anomaly detection operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;
