//! qmodel Adapter for Hosted Platforms
//!
//! This crate provides a [`Platform`](qmodel_hal::Platform) implementation
//! that reaches a hosted synthesis and execution service over HTTP.
//!
//! # REST Contract
//!
//! | Call | Request | Success response |
//! |------|---------|------------------|
//! | `POST {base}/v1/synthesis` | `{"model": <Model>}` | `{"program_id": str, "program": any}` |
//! | `POST {base}/v1/execution` | `{"program_id": str, "program": any, "shots": u32}` | `{"counts": {bits: u64}, "execution_time_ms"?: u64}` |
//!
//! Error responses carry `{"error": str, "message": str}` or plain text;
//! the text is propagated verbatim. HTTP 401 maps to
//! [`HalError::AuthenticationFailed`](qmodel_hal::HalError::AuthenticationFailed).
//!
//! # Configuration
//!
//! ```yaml
//! # ~/.qmodel/config.yaml
//! endpoint: https://platform.example.com
//! request_timeout_secs: 60
//! synthesis_timeout_secs: 300
//! execution_timeout_secs: 600
//! output_dir: ./models
//! ```
//!
//! `QMODEL_ENDPOINT`, `QMODEL_TOKEN` and `QMODEL_TIMEOUT` override the file.
//!
//! # Example
//!
//! ```ignore
//! use qmodel_adapter_remote::{RemoteConfig, RemotePlatform};
//! use qmodel_ir::Model;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RemoteConfig::load(None)?;
//!     let session = RemotePlatform::session(&config)?;
//!
//!     let (_, result) = session.sample(&Model::entangle()?, 2048).await?;
//!     println!("Results: {:?}", result.counts);
//!     Ok(())
//! }
//! ```

mod api;
mod config;
mod error;
mod platform;

pub use api::{
    ExecutionRequest, ExecutionResponse, REQUEST_ID_HEADER, RemoteClient, SynthesisRequest,
    SynthesisResponse,
};
pub use config::{ENDPOINT_ENV_VAR, RemoteConfig, TIMEOUT_ENV_VAR};
pub use error::{RemoteError, RemoteResult, Stage};
pub use platform::{PLATFORM_NAME, RemotePlatform};
