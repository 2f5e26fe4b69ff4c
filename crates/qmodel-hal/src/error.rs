//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in platform operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Synthesis was rejected; the message is the platform's own text.
    #[error("Synthesis failed: {0}")]
    Synthesis(String),

    /// Execution was rejected or returned an inconsistent result.
    #[error("Execution failed: {0}")]
    Execution(String),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Network error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A platform call did not finish in time.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// The model itself is malformed.
    #[error("Model error: {0}")]
    Ir(#[from] qmodel_ir::IrError),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
