//! Remote platform implementation.

use async_trait::async_trait;
use tracing::{info, instrument};

use qmodel_hal::{
    Counts, EnvTokenProvider, ExecutionResult, HalError, HalResult, Platform, Session,
    SynthesizedProgram,
};
use qmodel_ir::Model;

use crate::api::{ExecutionRequest, RemoteClient};
use crate::config::RemoteConfig;
use crate::error::RemoteResult;

/// Name reported by [`RemotePlatform::name`].
pub const PLATFORM_NAME: &str = "remote";

/// Hosted synthesis and execution platform reached over HTTP.
///
/// # Authentication
///
/// A token from the configuration wins; otherwise `QMODEL_TOKEN` is read from
/// the environment. With neither, requests are sent without `Authorization`.
///
/// # Example
///
/// ```ignore
/// use qmodel_adapter_remote::RemotePlatform;
///
/// let platform = RemotePlatform::new("https://platform.example.com")?;
/// ```
#[derive(Debug)]
pub struct RemotePlatform {
    client: RemoteClient,
}

impl RemotePlatform {
    /// Create a platform for `endpoint`, token from `QMODEL_TOKEN`.
    pub fn new(endpoint: impl Into<String>) -> RemoteResult<Self> {
        let client = RemoteClient::new(endpoint, EnvTokenProvider::qmodel().token())?;
        Ok(Self { client })
    }

    /// Create a platform from a validated configuration.
    pub fn from_remote_config(config: &RemoteConfig) -> RemoteResult<Self> {
        config.validate()?;
        let token = config
            .token
            .clone()
            .or_else(|| EnvTokenProvider::qmodel().token());
        let client = RemoteClient::with_timeout(&config.endpoint, token, config.request_timeout())?;
        Ok(Self { client })
    }

    /// Wrap in a [`Session`] carrying the configured round-trip bounds.
    pub fn session(config: &RemoteConfig) -> RemoteResult<Session<Self>> {
        let mut session = Session::new(Self::from_remote_config(config)?);
        if let Some(limit) = config.synthesis_timeout() {
            session = session.with_synthesis_timeout(limit);
        }
        if let Some(limit) = config.execution_timeout() {
            session = session.with_execution_timeout(limit);
        }
        Ok(session)
    }

    /// API base URL.
    pub fn endpoint(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl Platform for RemotePlatform {
    fn name(&self) -> &str {
        PLATFORM_NAME
    }

    #[instrument(skip(self, model), fields(model = model.name()))]
    async fn synthesize(&self, model: &Model) -> HalResult<SynthesizedProgram> {
        model.validate()?;
        let response = self.client.synthesize(model).await?;
        info!(program_id = %response.program_id, "Model synthesized");
        Ok(
            SynthesizedProgram::new(response.program_id, model.name(), response.program)
                .with_platform(PLATFORM_NAME),
        )
    }

    #[instrument(skip(self, program), fields(program_id = %program.id))]
    async fn execute(&self, program: &SynthesizedProgram, shots: u32) -> HalResult<ExecutionResult> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }

        let request = ExecutionRequest {
            program_id: &program.id.0,
            program: &program.payload,
            shots,
        };
        let response = self.client.execute(&request).await?;

        let counts: Counts = response.counts.into_iter().collect();
        let mut result = ExecutionResult::new(counts, shots).with_program_id(program.id.clone());
        if let Some(ms) = response.execution_time_ms {
            result = result.with_execution_time(ms);
        }
        let result = result.verify_shots()?;
        info!(outcomes = result.counts.len(), "Program executed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;

    #[test]
    fn test_platform_name() {
        let platform = RemotePlatform::new("http://localhost:8080").unwrap();
        assert_eq!(platform.name(), "remote");
        assert_eq!(platform.endpoint(), "http://localhost:8080");
    }

    #[test]
    fn test_from_remote_config_rejects_bad_scheme() {
        let config = RemoteConfig::default().with_endpoint("ftp://example.com");
        assert!(matches!(
            RemotePlatform::from_remote_config(&config).unwrap_err(),
            RemoteError::InvalidConfig(_)
        ));
    }

    #[test]
    fn test_from_remote_config_trims_endpoint() {
        let mut config = RemoteConfig::default().with_endpoint("https://platform.example.com/");
        config.token = Some("from-config".into());
        let platform = RemotePlatform::from_remote_config(&config).unwrap();
        assert_eq!(platform.endpoint(), "https://platform.example.com");
    }

    #[tokio::test]
    async fn test_zero_shots_rejected_before_network() {
        // Nothing listens on this port; the check must fire first.
        let platform = RemotePlatform::new("http://127.0.0.1:9").unwrap();
        let program = SynthesizedProgram::new("p", "m", serde_json::Value::Null);
        assert!(matches!(
            platform.execute(&program, 0).await.unwrap_err(),
            HalError::InvalidShots(_)
        ));
    }
}
