//! qmodel Command-Line Interface
//!
//! Build example models, inspect them, and send them to the hosted platform.
//!
//! ```text
//! qmodel export --model ghz --size 4 --out models/
//! qmodel show --input models/ghz.qmod
//! qmodel run --input models/ghz.qmod --shots 2048
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{ExampleModel, GlobalOptions, parse_assignment};
use commands::{export, run, show, synth, version};

/// qmodel - declarative quantum models for a hosted platform
#[derive(Parser)]
#[command(name = "qmodel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ~/.qmodel/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Platform endpoint, overriding the configuration
    #[arg(long, env = "QMODEL_ENDPOINT", global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a bundled example model and write it as an artifact
    Export {
        /// Example to build
        #[arg(short, long, value_enum, default_value_t = ExampleModel::Entangle)]
        model: ExampleModel,

        /// Register size for the parity and ghz examples
        #[arg(long, default_value = "3")]
        size: u32,

        /// Artifact name (defaults to the model name)
        #[arg(short, long)]
        name: Option<String>,

        /// Output directory (defaults to `output_dir` from the configuration)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Lower a model and print it as OpenQASM 3
    Show {
        /// Model artifact (.qmod)
        #[arg(short, long)]
        input: PathBuf,

        /// Classical input, as name=value (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, i64)>,
    },

    /// Submit a model for synthesis
    Synth {
        /// Model artifact (.qmod)
        #[arg(short, long)]
        input: PathBuf,

        /// Save the program handle as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Synthesize (unless given a saved program) and execute
    Run {
        /// Model artifact (.qmod)
        #[arg(short, long, required_unless_present = "program", conflicts_with = "program")]
        input: Option<PathBuf>,

        /// Program handle saved by `synth --output`
        #[arg(short, long)]
        program: Option<PathBuf>,

        /// Number of shots
        #[arg(short, long, default_value = "1024")]
        shots: u32,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let global = GlobalOptions {
        config: cli.config,
        endpoint: cli.endpoint,
    };

    // Execute command
    let result = match cli.command {
        Commands::Export {
            model,
            size,
            name,
            out,
        } => export::execute(&global, model, size, name.as_deref(), out),

        Commands::Show { input, set } => show::execute(&input, set),

        Commands::Synth { input, output } => {
            synth::execute(&global, &input, output.as_deref()).await
        }

        Commands::Run {
            input,
            program,
            shots,
            json,
        } => {
            run::execute(
                &global,
                input.as_deref(),
                program.as_deref(),
                shots,
                json,
            )
            .await
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
