//! Shared helpers for CLI commands.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use qmodel_adapter_remote::{RemoteConfig, RemotePlatform};
use qmodel_hal::{ExecutionResult, Session};
use qmodel_ir::{Model, read_artifact};

/// Options shared by every subcommand.
#[derive(Debug, Default)]
pub struct GlobalOptions {
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
    /// Endpoint override from `--endpoint` or `QMODEL_ENDPOINT`.
    pub endpoint: Option<String>,
}

/// Bundled example models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExampleModel {
    /// Two entangled qubits.
    Entangle,
    /// X on every even-indexed qubit, decided per loop index.
    Parity,
    /// GHZ state preparation.
    Ghz,
}

impl ExampleModel {
    /// Build the model; `size` is ignored by `entangle`.
    pub fn build(self, size: u32) -> Result<Model> {
        let model = match self {
            ExampleModel::Entangle => Model::entangle(),
            ExampleModel::Parity => Model::alternating_flips(size),
            ExampleModel::Ghz => Model::ghz(size),
        };
        Ok(model?)
    }
}

/// Parse a `name=value` classical input.
pub fn parse_assignment(s: &str) -> Result<(String, i64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in '{s}'"));
    }
    let value = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not an integer", value.trim()))?;
    Ok((name.to_string(), value))
}

/// Load configuration, applying the global endpoint override.
pub fn load_config(global: &GlobalOptions) -> Result<RemoteConfig> {
    let mut config = RemoteConfig::load(global.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(ref endpoint) = global.endpoint {
        config = config.with_endpoint(endpoint.as_str());
        config.validate().context("Invalid --endpoint")?;
    }
    debug!(?config, "Configuration loaded");
    Ok(config)
}

/// Open a session against the configured platform.
pub fn open_session(global: &GlobalOptions) -> Result<Session<RemotePlatform>> {
    let config = load_config(global)?;
    let session = RemotePlatform::session(&config)
        .with_context(|| format!("Failed to set up platform at {}", config.endpoint))?;
    Ok(session)
}

/// Load a model artifact.
pub fn load_model(path: &Path) -> Result<Model> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    read_artifact(path).with_context(|| format!("Failed to load model: {}", path.display()))
}

/// Spinner shown while waiting on the platform.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print execution results in a table format.
pub fn print_results(result: &ExecutionResult) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        result.shots
    );

    let sorted = result.counts.sorted();
    let total = result.counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = **count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }

    if let Some(time_ms) = result.execution_time_ms {
        println!("\n  Execution time: {} ms", style(time_ms).yellow());
    }
}
