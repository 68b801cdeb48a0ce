// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line interface for the cicycle binary.
//!
//! The CLI exposes a single `run` subcommand that executes one full CI cycle
//! for a branch: sync, verify, extract stats, render badges, publish.

use std::{path::PathBuf, process};

use clap::{Args, Parser, Subcommand};
use cicycle::{CycleOutcome, Error, PipelineConfig, SystemRunner, run_cycle};
use tracing_subscriber::EnvFilter;

/// Command line interface for running verification cycles.
#[derive(Debug, Parser)]
#[command(name = "cicycle", version, about = "Run a verification cycle and publish status badges")]
struct Cli {
    #[command(subcommand)]
    command: Command
}

/// Supported commands exposed by the CLI.
#[derive(Debug, Subcommand)]
enum Command {
    /// Run one full cycle for a branch.
    Run(RunArgs)
}

/// Arguments accepted by the `run` subcommand.
#[derive(Debug, Args)]
struct RunArgs {
    /// Branch to check out and verify; defaults to the configured branch.
    #[arg(value_name = "BRANCH")]
    branch: Option<String>,

    /// Path to an optional YAML configuration file overriding the defaults.
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>
}

/// Entry point that reports errors and sets the appropriate exit status.
///
/// Exit status 0 means the happy path completed; 1 means a stage failed and
/// the fallback badge set was published; 2 means the CLI could not start a
/// run at all (for example, an invalid configuration file).
fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run() {
        Ok(CycleOutcome::Success) => {}
        Ok(CycleOutcome::Failed) => process::exit(1),
        Err(error) => {
            eprintln!("{}", error.to_display_string());
            process::exit(2);
        }
    }
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates errors originating from configuration loading; pipeline
/// failures are reported through [`CycleOutcome`] instead.
fn run() -> Result<CycleOutcome, Error> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run_command(args)
    }
}

fn run_command(args: RunArgs) -> Result<CycleOutcome, Error> {
    let config = match args.config {
        Some(path) => PipelineConfig::load(&path)?,
        None => PipelineConfig::default()
    };
    let branch = args.branch.unwrap_or_else(|| config.default_branch.clone());

    let runner = SystemRunner;
    Ok(run_cycle(&runner, &config, &branch))
}
