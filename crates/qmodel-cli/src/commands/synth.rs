//! Synth command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use super::common::{GlobalOptions, load_model, open_session, spinner};

/// Execute the synth command.
pub async fn execute(global: &GlobalOptions, input: &Path, output: Option<&Path>) -> Result<()> {
    let model = load_model(input)?;
    let session = open_session(global)?;

    println!(
        "{} Synthesizing {} on {}",
        style("→").cyan().bold(),
        style(model.name()).green(),
        style(session.platform().endpoint()).yellow()
    );

    let spinner = spinner("Waiting for synthesis...");
    let program = session.submit(&model).await;
    spinner.finish_and_clear();
    let program = program?;

    println!("{} Program synthesized", style("✓").green().bold());
    println!("  Program ID: {}", style(&program.id).cyan());
    println!("  Model:      {}", program.model_name);
    println!(
        "  Created:    {}",
        program.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&program)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write program: {}", path.display()))?;
        println!("  Saved to:   {}", style(path.display()).green());
    }

    Ok(())
}
