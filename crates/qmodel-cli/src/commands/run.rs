//! Run command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qmodel_hal::SynthesizedProgram;

use super::common::{GlobalOptions, load_model, open_session, print_results, spinner};

/// Execute the run command.
///
/// With `input`, the model is synthesized first; with `program`, a handle
/// saved by `synth --output` is executed directly.
pub async fn execute(
    global: &GlobalOptions,
    input: Option<&Path>,
    program: Option<&Path>,
    shots: u32,
    json: bool,
) -> Result<()> {
    let session = open_session(global)?;

    let program = match (input, program) {
        (_, Some(path)) => load_program(path)?,
        (Some(path), None) => {
            let model = load_model(path)?;
            if !json {
                println!(
                    "{} Running {} on {} ({} shots)",
                    style("→").cyan().bold(),
                    style(model.name()).green(),
                    style(session.platform().endpoint()).yellow(),
                    shots
                );
            }
            let spinner = spinner("Waiting for synthesis...");
            let program = session.submit(&model).await;
            spinner.finish_and_clear();
            program?
        }
        (None, None) => anyhow::bail!("either --input or --program is required"),
    };

    let spinner = spinner(format!("Executing program {}...", program.id));
    let result = session.run(&program, shots).await;
    spinner.finish_and_clear();
    let result = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_results(&result);
    }

    Ok(())
}

fn load_program(path: &Path) -> Result<SynthesizedProgram> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read program: {}", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("Not a program handle: {}", path.display()))
}
