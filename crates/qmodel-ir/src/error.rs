//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while building, lowering or serializing a model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Index lies outside the register bounds.
    #[error("Index {index} out of range for register '{register}' of size {size}{}", format_gate_context(.gate_name))]
    OutOfRange {
        /// Register that was indexed.
        register: String,
        /// The offending index.
        index: u32,
        /// Declared register size.
        size: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Register was never allocated in this model.
    #[error("Register '{0}' is not declared in this model")]
    UnknownRegister(String),

    /// Register name is already taken.
    #[error("Register '{0}' is already declared")]
    DuplicateRegister(String),

    /// Allocation attempted inside a conditional or repeat body.
    #[error("Register '{0}' cannot be allocated inside a conditional or repeat body")]
    AllocationInBody(String),

    /// Artifact name is empty or contains a path separator.
    #[error("Invalid artifact name '{0}'")]
    InvalidArtifactName(String),

    /// Register offsets are not contiguous in declaration order.
    #[error("Register '{0}' does not start where the previous register ends")]
    InvalidRegisterLayout(String),

    /// Registers together exceed the addressable qubit range.
    #[error("Register '{0}' does not fit: total qubit count exceeds {max}", max = u32::MAX)]
    TooManyQubits(String),

    /// Model name is empty or contains control characters.
    #[error("Invalid model name {0:?}")]
    InvalidModelName(String),

    /// Register of size zero.
    #[error("Register '{0}' must contain at least one qubit")]
    EmptyRegister(String),

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Same qubit used twice in one gate application.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit, rendered as `reg[idx]`.
        qubit: String,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Repeat record whose iteration list disagrees with its count.
    #[error("Repeat declares {count} iterations but carries {iterations}")]
    RepeatCountMismatch {
        /// Declared count.
        count: u32,
        /// Number of iteration bodies present.
        iterations: usize,
    },

    /// Classical variable has no value at lowering time.
    #[error("Classical variable '{0}' is unbound")]
    UnboundVariable(String),

    /// Modulo by zero in a classical expression.
    #[error("Division by zero in classical expression")]
    DivisionByZero,

    /// Integer overflow in a classical expression.
    #[error("Arithmetic overflow in classical expression")]
    ArithmeticOverflow,

    /// Artifact written by an unknown format version.
    #[error("Unsupported model format version {found} (expected {expected})")]
    UnsupportedFormat {
        /// Version found in the artifact.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },

    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing an artifact failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
