//! Platform trait.
//!
//! A [`Platform`] is the external collaborator that turns a model into an
//! executable program and runs it:
//!
//! ```text
//!   synthesize(&Model) ──→ SynthesizedProgram ──→ execute(&program, shots) ──→ ExecutionResult
//!        (async)                                        (async)
//! ```
//!
//! ## Method table
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `synthesize()` | async | yes | `HalResult<SynthesizedProgram>` |
//! | `execute()` | async | yes | `HalResult<ExecutionResult>` |
//! | `show()` | async | provided | `HalResult<()>` |
//!
//! Each call is a single round trip. Implementations do not retry.

use async_trait::async_trait;
use tracing::info;

use qmodel_ir::Model;

use crate::error::HalResult;
use crate::program::SynthesizedProgram;
use crate::result::ExecutionResult;

/// Trait for synthesis and execution platforms.
///
/// # Contract
///
/// - `synthesize()` MUST propagate the platform's rejection text verbatim
///   in [`HalError::Synthesis`](crate::HalError::Synthesis).
/// - `execute()` MUST reject `shots == 0` with
///   [`HalError::InvalidShots`](crate::HalError::InvalidShots) and MUST only
///   return results whose counts sum to `shots`.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Get the name of this platform.
    fn name(&self) -> &str;

    /// Send a model for synthesis.
    async fn synthesize(&self, model: &Model) -> HalResult<SynthesizedProgram>;

    /// Run a synthesized program for `shots` repetitions.
    async fn execute(&self, program: &SynthesizedProgram, shots: u32)
    -> HalResult<ExecutionResult>;

    /// Display a synthesized program.
    ///
    /// The default implementation only logs the handle.
    async fn show(&self, program: &SynthesizedProgram) -> HalResult<()> {
        info!(
            platform = self.name(),
            program_id = %program.id,
            model = %program.model_name,
            "Synthesized program"
        );
        Ok(())
    }
}
