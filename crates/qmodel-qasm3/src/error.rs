//! Error types for the QASM emitter.

use thiserror::Error;

/// Errors that can occur during emission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// Angle is NaN or infinite and has no textual form.
    #[error("Gate '{gate}' has a non-finite angle: {value}")]
    NonFiniteAngle { gate: String, value: f64 },

    /// Register name is not a valid OpenQASM identifier.
    #[error("Register name '{0}' is not a valid OpenQASM identifier")]
    InvalidIdentifier(String),

    /// Lowering the model failed.
    #[error("Lowering error: {0}")]
    Lowering(#[from] qmodel_ir::IrError),
}

/// Result type for emission.
pub type EmitResult<T> = Result<T, EmitError>;
