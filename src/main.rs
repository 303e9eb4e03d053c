//! npmup - Policy-driven npm dependency updater CLI tool
//!
//! Prunes node_modules, finds outdated packages, installs the newest
//! versions allowed by the selected policy and commits the manifests.

use clap::Parser;
use npmup::cli::CliArgs;
use npmup::error::AppError;
use npmup::orchestrator::{Orchestrator, RunConfig};
use npmup::output::{create_formatter, OutputConfig};
use npmup::runner::SystemCommandRunner;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr log subscriber; RUST_LOG overrides the default level
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "npmup=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = RunConfig::from_cli(&args).map_err(AppError::from)?;
    tracing::debug!(
        path = %config.path.display(),
        mode = %config.policy.mode,
        dry_run = config.dry_run,
        "starting npmup v{}",
        env!("CARGO_PKG_VERSION")
    );

    let runner = SystemCommandRunner::new(&config.path);
    let orchestrator = Orchestrator::new(config, runner);
    let report = orchestrator.run().await.map_err(AppError::from)?;

    // Create output formatter based on CLI options
    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet)
        .with_color(io::stdout().is_terminal());
    let formatter = create_formatter(output_config);

    // Output results
    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
