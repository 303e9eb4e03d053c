//! Update orchestrator for coordinating the entire update workflow
//!
//! This module provides:
//! - Workflow coordination: prune → fetch → classify → install → commit
//! - Dry-run mode support (stop after classification)
//! - Skipping install and commit when nothing is updateable

use crate::cli::CliArgs;
use crate::domain::UpdateBatch;
use crate::error::{ConfigError, UpdateError};
use crate::git;
use crate::package_manager::{self, InstallReport};
use crate::progress::Progress;
use crate::runner::CommandRunner;
use crate::update::{
    fetch_outdated, UpdateClassifier, UpdateMode, UpdatePolicy, DEFAULT_CONCURRENCY,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Configuration for one update run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Project directory
    pub path: PathBuf,
    /// Update policy
    pub policy: UpdatePolicy,
    /// Stop after classification
    pub dry_run: bool,
    /// Maximum concurrent version queries
    pub concurrency: usize,
    /// Show step spinners
    pub show_progress: bool,
}

impl RunConfig {
    /// Create a configuration with default options
    pub fn new(path: impl Into<PathBuf>, policy: UpdatePolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            dry_run: false,
            concurrency: DEFAULT_CONCURRENCY,
            show_progress: false,
        }
    }

    /// Set dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the concurrency limit
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Create configuration from CLI arguments, checking the project directory
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        validate_project_dir(&args.path)?;

        let mut config = Self::new(&args.path, args.policy())
            .with_dry_run(args.dry_run)
            .with_concurrency(args.concurrency);
        config.show_progress = !args.quiet && !args.json;
        Ok(config)
    }
}

/// Check that `path` is a directory with a package.json
pub fn validate_project_dir(path: &Path) -> Result<(), ConfigError> {
    if !path.is_dir() {
        return Err(ConfigError::DirectoryNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.join("package.json").is_file() {
        return Err(ConfigError::ManifestNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing to update
    UpToDate,
    /// Dry run with updates available
    Planned,
    /// Dependencies installed and committed
    Updated,
}

/// Result of running the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Policy mode used
    pub mode: UpdateMode,
    /// Whether this was a dry-run
    pub dry_run: bool,
    /// Number of outdated dependencies npm reported
    pub outdated: usize,
    /// Classified updates
    pub batch: UpdateBatch,
    /// Install commands that ran
    pub install: InstallReport,
    /// Whether a commit was created
    pub committed: bool,
}

impl RunReport {
    fn new(mode: UpdateMode, dry_run: bool) -> Self {
        Self {
            mode,
            dry_run,
            outdated: 0,
            batch: UpdateBatch::new(),
            install: InstallReport::default(),
            committed: false,
        }
    }

    /// Returns true if any dependency was (or would be) updated
    pub fn has_updates(&self) -> bool {
        !self.batch.is_empty()
    }

    pub fn outcome(&self) -> RunOutcome {
        if !self.has_updates() {
            RunOutcome::UpToDate
        } else if self.dry_run {
            RunOutcome::Planned
        } else {
            RunOutcome::Updated
        }
    }
}

/// Orchestrator for coordinating the update workflow
pub struct Orchestrator<R: CommandRunner> {
    config: RunConfig,
    runner: R,
}

impl<R: CommandRunner> Orchestrator<R> {
    /// Create a new orchestrator running commands through `runner`
    pub fn new(config: RunConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run the update workflow
    pub async fn run(&self) -> Result<RunReport, UpdateError> {
        let mode = self.config.policy.mode;
        let mut progress = Progress::new(self.config.show_progress);
        let mut report = RunReport::new(mode, self.config.dry_run);

        // Step 1: Prune extraneous packages
        progress.step("cleaning up node_modules directory");
        package_manager::prune(&self.runner).await?;

        // Step 2: Fetch the outdated set
        progress.step("get outdated dependencies");
        let outdated = fetch_outdated(&self.runner).await?;
        report.outdated = outdated.len();
        if outdated.is_empty() {
            info!("no outdated dependencies");
            return Ok(report);
        }

        // Step 3: Resolve install versions per policy
        progress.step(&format!("get latest {} versions", mode));
        report.batch = UpdateClassifier::new(&self.runner, self.config.policy.clone())
            .with_concurrency(self.config.concurrency)
            .classify(outdated)
            .await?;
        progress.finish_and_clear();

        if report.batch.is_empty() {
            info!("no updateable dependencies");
            return Ok(report);
        }
        if self.config.dry_run {
            info!(count = report.batch.len(), "dry run, skipping install and commit");
            return Ok(report);
        }

        // Step 4: Install both dependency sets
        progress.step("update dependencies");
        report.install = package_manager::install(&self.runner, &report.batch).await?;

        // Step 5: Commit manifest changes
        progress.step("commit changes");
        git::commit(&self.runner).await?;
        report.committed = true;
        progress.finish_and_clear();

        Ok(report)
    }
}
