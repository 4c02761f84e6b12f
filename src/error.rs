//! Error types for Semejanza operations.
//!
//! The similarity pipeline itself has no fatal internal errors: items and
//! pairs failing threshold checks are dropped, and undefined arithmetic
//! (zero-variance correlation denominators) propagates as non-finite
//! values in the output. The only fallible surface is hyperparameter
//! validation.

use std::fmt;

/// Main error type for Semejanza operations.
///
/// # Examples
///
/// ```
/// use semejanza::error::SemejanzaError;
///
/// let err = SemejanzaError::InvalidHyperparameter {
///     param: "min_intersection".to_string(),
///     value: "0".to_string(),
///     constraint: "must be >= 1".to_string(),
/// };
/// assert!(err.to_string().contains("min_intersection"));
/// ```
#[derive(Debug)]
pub enum SemejanzaError {
    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for SemejanzaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemejanzaError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter {param} = {value}: {constraint}"
                )
            }
            SemejanzaError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SemejanzaError {}

impl From<&str> for SemejanzaError {
    fn from(msg: &str) -> Self {
        SemejanzaError::Other(msg.to_string())
    }
}

impl From<String> for SemejanzaError {
    fn from(msg: String) -> Self {
        SemejanzaError::Other(msg)
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SemejanzaError>;
