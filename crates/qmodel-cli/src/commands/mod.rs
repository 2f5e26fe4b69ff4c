//! CLI command implementations.

pub mod common;
pub mod export;
pub mod run;
pub mod show;
pub mod synth;
pub mod version;
