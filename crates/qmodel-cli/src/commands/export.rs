//! Export command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use qmodel_ir::write_artifact;

use super::common::{ExampleModel, GlobalOptions, load_config};

/// Execute the export command.
pub fn execute(
    global: &GlobalOptions,
    example: ExampleModel,
    size: u32,
    name: Option<&str>,
    out: Option<PathBuf>,
) -> Result<()> {
    let model = example.build(size)?;
    let name = name.unwrap_or(model.name());

    let dir = match out {
        Some(dir) => dir,
        None => load_config(global)?.output_dir,
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let path = write_artifact(&model, &dir, name)?;

    println!(
        "{} Exported {} ({} qubits, {} operations)",
        style("✓").green().bold(),
        style(model.name()).cyan(),
        model.num_qubits(),
        model.operations().len()
    );
    println!("  Written to: {}", style(path.display()).green());

    Ok(())
}
