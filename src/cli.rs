//! CLI argument parsing module for npmup

use crate::update::{UpdateMode, UpdatePolicy, DEFAULT_CONCURRENCY};
use clap::Parser;
use std::path::PathBuf;

/// Parse a concurrency limit, which must be at least 1
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if value == 0 {
        return Err("concurrency must be at least 1".to_string());
    }
    Ok(value)
}

/// Policy-driven npm dependency updater
#[derive(Parser, Debug, Clone)]
#[command(
    name = "npmup",
    version,
    about = "Update npm dependencies by semver policy and commit the result"
)]
pub struct CliArgs {
    /// Project directory containing package.json (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // Update mode
    /// Update to the latest published version, across major releases
    #[arg(long)]
    pub major: bool,

    /// Update to the newest minor/patch release of the wanted major (default)
    #[arg(long)]
    pub minor: bool,

    /// Update to the newest patch release of the wanted major.minor
    #[arg(long)]
    pub patch: bool,

    /// Only update packages whose name starts with this prefix (e.g. @scope)
    #[arg(long, default_value = "")]
    pub prefix: String,

    // General options
    /// Dry run mode - show what would be installed without installing or committing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Maximum number of concurrent version queries
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_concurrency)]
    pub concurrency: usize,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// The update mode selected by the flags
    pub fn mode(&self) -> UpdateMode {
        UpdateMode::from_flags(self.major, self.patch)
    }

    /// The update policy selected by the flags
    pub fn policy(&self) -> UpdatePolicy {
        UpdatePolicy::new()
            .with_mode(self.mode())
            .with_prefix(self.prefix.clone())
    }
}
