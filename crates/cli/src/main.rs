//! # PPS Sequencer CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Route loading and configuration validation
//! - Sequencing and correction passes
//! - Session persistence between invocations

mod cli;
mod commands;
mod error;
mod report;
mod session;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_load, run_mark_bad, run_show, run_sort, run_validate};
use session::Session;

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        session = %cli.session.display(),
        "PPS Sequencer starting"
    );

    let result = execute(&cli);

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

fn execute(cli: &Cli) -> Result<()> {
    if let Commands::Validate(args) = &cli.command {
        return run_validate(args);
    }

    let mut session = Session::load(&cli.session)?;
    match &cli.command {
        Commands::Load(args) => run_load(args, &mut session, &cli.session),
        Commands::Sort(args) => run_sort(args, &mut session, &cli.session),
        Commands::MarkBad(args) => run_mark_bad(args, &mut session, &cli.session),
        Commands::Show(args) => run_show(args, &session),
        Commands::Validate(args) => run_validate(args),
    }
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let (default_log_level, force_level) = if cli.quiet {
        ("warn", true)
    } else {
        match cli.verbose {
            0 => ("info", false),
            1 => ("debug", false),
            _ => ("trace", false),
        }
    };

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        default_log_level: default_log_level.to_string(),
        force_level,
    })
}
