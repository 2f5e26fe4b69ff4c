//! Synthesized program handles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier the platform assigned to a synthesized program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramId(pub String);

impl ProgramId {
    /// Create a new program ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ProgramId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProgramId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProgramId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque handle to a program returned by synthesis.
///
/// The payload is whatever the platform returned and is sent back verbatim
/// on execution; nothing in this crate looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedProgram {
    /// Platform-assigned identifier.
    pub id: ProgramId,
    /// Name of the model the program was synthesized from.
    pub model_name: String,
    /// Opaque program payload.
    pub payload: serde_json::Value,
    /// When the handle was created.
    pub created_at: DateTime<Utc>,
    /// Platform that produced the program.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl SynthesizedProgram {
    /// Create a new program handle, stamped with the current time.
    pub fn new(
        id: impl Into<ProgramId>,
        model_name: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            model_name: model_name.into(),
            payload,
            created_at: Utc::now(),
            platform: None,
        }
    }

    /// Set the platform name.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}
