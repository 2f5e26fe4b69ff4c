//! Show command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use qmodel_ir::ClassicalEnv;
use qmodel_qasm3::emit;

use super::common::load_model;

/// Execute the show command.
pub fn execute(input: &Path, assignments: Vec<(String, i64)>) -> Result<()> {
    let model = load_model(input)?;

    let env = assignments
        .into_iter()
        .fold(ClassicalEnv::new(), |env, (name, value)| env.with(name, value));
    let inputs = model.inputs();
    let missing: Vec<&str> = inputs
        .iter()
        .filter(|name| env.get(name).is_none())
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        anyhow::bail!(
            "Missing classical input(s): {} (pass --set NAME=VALUE)",
            missing.join(", ")
        );
    }
    let circuit = model.lower(&env)?;

    println!(
        "{} {} ({} qubits, {} gates)",
        style("→").cyan().bold(),
        style(model.name()).green(),
        circuit.num_qubits(),
        circuit.len()
    );
    if !inputs.is_empty() {
        let bound: Vec<String> = inputs
            .iter()
            .filter_map(|name| env.get(name).map(|value| format!("{name}={value}")))
            .collect();
        println!("  Inputs: {}", bound.join(", "));
    }
    println!();
    print!("{}", emit(&circuit)?);

    if !circuit.is_empty() {
        println!();
        println!("Gate counts:");
        for (name, count) in circuit.gate_histogram() {
            println!("  {:<6} {:>6}", style(name).cyan(), count);
        }
    }

    Ok(())
}
