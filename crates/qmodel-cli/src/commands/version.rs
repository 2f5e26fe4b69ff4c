//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - declarative quantum models for a hosted platform",
        style("qmodel").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qmodel-ir              Model builder, lowering and artifacts");
    println!("  qmodel-qasm3           OpenQASM 3 rendering");
    println!("  qmodel-hal             Platform abstraction layer");
    println!("  qmodel-adapter-remote  Hosted platform client");
    println!("  qmodel-cli             Command-line interface");
    println!();
    println!(
        "Artifact format: {}",
        style(format!("v{}", qmodel_ir::FORMAT_VERSION)).dim()
    );
}
