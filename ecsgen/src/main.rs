//! `ecsgen` command line.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Generate Rust modules from ecsgen schema documents
#[derive(Parser, Debug)]
#[command(name = "ecsgen", version, about)]
struct Cli {
    /// Directory searched recursively for `*.json` schema documents
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Directory receiving the generated module tree
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let written = ecsgen::generate_dir(&cli.input_dir, &cli.output_dir).with_context(|| {
        format!(
            "failed to generate {} from {}",
            cli.output_dir.display(),
            cli.input_dir.display()
        )
    })?;
    info!(files = written.len(), "done");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
