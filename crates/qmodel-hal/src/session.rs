//! Sequential submit/run workflow over a platform.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, instrument};

use qmodel_ir::Model;

use crate::error::{HalError, HalResult};
use crate::platform::Platform;
use crate::program::SynthesizedProgram;
use crate::result::ExecutionResult;

/// Wraps a [`Platform`] with optional timeouts around its two round trips.
///
/// Calls are awaited one after another; a session never has more than one
/// request in flight.
#[derive(Debug)]
pub struct Session<P> {
    platform: P,
    synthesis_timeout: Option<Duration>,
    execution_timeout: Option<Duration>,
}

impl<P: Platform> Session<P> {
    /// Create a session without timeouts.
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            synthesis_timeout: None,
            execution_timeout: None,
        }
    }

    /// Bound the time spent waiting for synthesis.
    pub fn with_synthesis_timeout(mut self, timeout: Duration) -> Self {
        self.synthesis_timeout = Some(timeout);
        self
    }

    /// Bound the time spent waiting for execution.
    pub fn with_execution_timeout(mut self, timeout: Duration) -> Self {
        self.execution_timeout = Some(timeout);
        self
    }

    /// The wrapped platform.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Send `model` for synthesis.
    #[instrument(skip_all, fields(platform = self.platform.name(), model = model.name()))]
    pub async fn submit(&self, model: &Model) -> HalResult<SynthesizedProgram> {
        model.validate()?;
        let program = bounded(
            "synthesis",
            self.synthesis_timeout,
            self.platform.synthesize(model),
        )
        .await?;
        debug!(program_id = %program.id, "Synthesis complete");
        Ok(program)
    }

    /// Execute `program` for `shots` repetitions.
    #[instrument(skip_all, fields(platform = self.platform.name(), program_id = %program.id, shots = shots))]
    pub async fn run(&self, program: &SynthesizedProgram, shots: u32) -> HalResult<ExecutionResult> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }
        let result = bounded(
            "execution",
            self.execution_timeout,
            self.platform.execute(program, shots),
        )
        .await?
        .verify_shots()?;
        debug!(outcomes = result.counts.len(), "Execution complete");
        Ok(result)
    }

    /// Display `program` through the platform.
    pub async fn show(&self, program: &SynthesizedProgram) -> HalResult<()> {
        self.platform.show(program).await
    }

    /// Synthesize then execute in sequence.
    pub async fn sample(
        &self,
        model: &Model,
        shots: u32,
    ) -> HalResult<(SynthesizedProgram, ExecutionResult)> {
        let program = self.submit(model).await?;
        let result = self.run(&program, shots).await?;
        Ok((program, result))
    }
}

async fn bounded<T>(
    stage: &str,
    limit: Option<Duration>,
    fut: impl Future<Output = HalResult<T>>,
) -> HalResult<T> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| HalError::Timeout(format!("{stage} did not finish within {limit:?}")))?,
        None => fut.await,
    }
}
