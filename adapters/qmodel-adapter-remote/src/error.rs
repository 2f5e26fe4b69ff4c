//! Error types for the remote adapter.

use thiserror::Error;

use qmodel_hal::HalError;

/// Result type for remote platform operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Which round trip an API error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `POST /v1/synthesis`.
    Synthesis,
    /// `POST /v1/execution`.
    Execution,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Synthesis => write!(f, "synthesis"),
            Stage::Execution => write!(f, "execution"),
        }
    }
}

/// Errors that can occur when talking to a remote platform.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform rejected the bearer token.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// API error response; `message` is the platform's text.
    #[error("API error during {stage} ({status}): {message}")]
    ApiError {
        stage: Stage,
        status: u16,
        message: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("Cannot read configuration file {path}: {message}")]
    ConfigIo { path: String, message: String },

    /// Configuration file is not valid YAML.
    #[error("Cannot parse configuration: {0}")]
    ConfigParse(String),
}

impl From<RemoteError> for HalError {
    fn from(e: RemoteError) -> Self {
        match e {
            RemoteError::Http(err) if err.is_timeout() => HalError::Timeout(err.to_string()),
            RemoteError::Http(err) => HalError::Network(err),
            RemoteError::Json(err) => HalError::Serialization(err),
            RemoteError::AuthFailed(msg) => HalError::AuthenticationFailed(msg),
            RemoteError::ApiError {
                stage: Stage::Synthesis,
                message,
                ..
            } => HalError::Synthesis(message),
            RemoteError::ApiError {
                stage: Stage::Execution,
                message,
                ..
            } => HalError::Execution(message),
            RemoteError::InvalidConfig(_)
            | RemoteError::ConfigIo { .. }
            | RemoteError::ConfigParse(_) => HalError::Configuration(e.to_string()),
        }
    }
}
