//! qmodel Platform Abstraction Layer
//!
//! This crate defines how a [`Model`](qmodel_ir::Model) reaches an external
//! platform and how results come back.
//!
//! # Overview
//!
//! - A common [`Platform`] trait for synthesis and execution
//! - [`SynthesizedProgram`], an opaque handle to what synthesis returned
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//! - [`Session`], which sequences the two calls with optional timeouts
//! - Token sourcing from the environment via [`EnvTokenProvider`]
//!
//! # Example: Sampling a Model
//!
//! ```ignore
//! use qmodel_hal::Session;
//! use qmodel_adapter_remote::RemotePlatform;
//! use qmodel_ir::Model;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let platform = RemotePlatform::new("https://platform.example.com")?;
//!     let session = Session::new(platform);
//!
//!     let model = Model::entangle()?;
//!     let (program, result) = session.sample(&model, 2048).await?;
//!     println!("Program {}: {:?}", program.id, result.counts);
//!
//!     if let Some((bitstring, count)) = result.counts.most_frequent() {
//!         println!("Most frequent: {} ({} times)", bitstring, count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Implementing a Custom Platform
//!
//! ```ignore
//! use qmodel_hal::{ExecutionResult, HalResult, Platform, SynthesizedProgram};
//! use qmodel_ir::Model;
//! use async_trait::async_trait;
//!
//! struct MyPlatform;
//!
//! #[async_trait]
//! impl Platform for MyPlatform {
//!     fn name(&self) -> &str { "my_platform" }
//!
//!     async fn synthesize(&self, model: &Model) -> HalResult<SynthesizedProgram> {
//!         # todo!()
//!     }
//!
//!     async fn execute(&self, program: &SynthesizedProgram, shots: u32) -> HalResult<ExecutionResult> {
//!         # todo!()
//!     }
//! }
//! ```

pub mod auth;
pub mod error;
pub mod platform;
pub mod program;
pub mod result;
pub mod session;

pub use auth::{EnvTokenProvider, TOKEN_ENV_VAR};
pub use error::{HalError, HalResult};
pub use platform::Platform;
pub use program::{ProgramId, SynthesizedProgram};
pub use result::{Counts, ExecutionResult};
pub use session::Session;
