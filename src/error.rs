//! Error types for the SDOF response engine

use thiserror::Error;

/// Main error type for integration and spectrum operations
#[derive(Error, Debug)]
pub enum SpectrumError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Specified time integrator '{0}' does not exist")]
    UnsupportedIntegrator(String),

    #[error("Numerical degeneracy: {0}")]
    NumericalDegeneracy(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for integration and spectrum operations
pub type SpectrumResult<T> = Result<T, SpectrumError>;

/// Shorthand for an `InvalidParameter` error
pub(crate) fn invalid(msg: impl Into<String>) -> SpectrumError {
    SpectrumError::InvalidParameter(msg.into())
}
