//! Application error types using thiserror
//!
//! Error hierarchy:
//! - CommandError: Issues spawning or running an external program
//! - UpdateError: Fatal failures of the prune/fetch/resolve/install/commit pipeline
//! - ConfigError: Issues with the target project directory

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DependencyKind;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Update pipeline errors
    #[error(transparent)]
    Update(#[from] UpdateError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors returned by a command runner
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program could not be started at all
    #[error("failed to execute '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited unsuccessfully
    #[error("'{command}' exited with {}{}", status_label(.status), stderr_suffix(.stderr))]
    Failed {
        command: String,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

fn status_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Errors that abort an update run
#[derive(Error, Debug)]
pub enum UpdateError {
    /// `npm prune` failed
    #[error("failed to prune node_modules: {0}")]
    Prune(#[source] CommandError),

    /// `npm outdated` failed without producing output
    #[error("failed to fetch outdated dependencies: {0}")]
    FetchFailure(#[source] CommandError),

    /// `npm outdated` output was not the expected mapping
    #[error("malformed outdated data: {message}")]
    MalformedOutdatedData { message: String },

    /// `npm view` failed for a package
    #[error("failed to query versions of '{package}@{range}': {source}")]
    VersionQuery {
        package: String,
        range: String,
        #[source]
        source: CommandError,
    },

    /// `npm view` output was not a version list
    #[error("malformed version list for '{package}@{range}': {message}")]
    MalformedVersionList {
        package: String,
        range: String,
        message: String,
    },

    /// No published version satisfies the query range
    #[error("no version of '{package}' matches '{range}'")]
    NoMatchingVersion { package: String, range: String },

    /// A version string that must be valid semver is not
    #[error("'{version}' of '{package}' is not a valid semantic version")]
    InvalidVersion { package: String, version: String },

    /// `npm install` failed for one dependency set
    #[error("failed to install {kind}: {source}")]
    InstallFailure {
        kind: DependencyKind,
        #[source]
        source: CommandError,
    },

    /// Staging or committing failed
    #[error("failed to {step}: {source}")]
    CommitFailure {
        step: String,
        #[source]
        source: CommandError,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Target directory missing or not a directory
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Target directory has no package.json
    #[error("package.json not found in {path}")]
    ManifestNotFound { path: PathBuf },
}

impl CommandError {
    /// Creates a new Spawn error
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        CommandError::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Creates a new Failed error
    pub fn failed(
        command: impl Into<String>,
        status: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        CommandError::Failed {
            command: command.into(),
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Standard output captured before the failure, if any
    pub fn stdout(&self) -> &str {
        match self {
            CommandError::Spawn { .. } => "",
            CommandError::Failed { stdout, .. } => stdout,
        }
    }

    /// Standard error captured before the failure, if any
    pub fn stderr(&self) -> &str {
        match self {
            CommandError::Spawn { .. } => "",
            CommandError::Failed { stderr, .. } => stderr,
        }
    }
}

impl UpdateError {
    /// Creates a new MalformedOutdatedData error
    pub fn malformed_outdated(message: impl Into<String>) -> Self {
        UpdateError::MalformedOutdatedData {
            message: message.into(),
        }
    }

    /// Creates a new NoMatchingVersion error
    pub fn no_matching_version(package: impl Into<String>, range: impl Into<String>) -> Self {
        UpdateError::NoMatchingVersion {
            package: package.into(),
            range: range.into(),
        }
    }

    /// Creates a new MalformedVersionList error
    pub fn malformed_version_list(
        package: impl Into<String>,
        range: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        UpdateError::MalformedVersionList {
            package: package.into(),
            range: range.into(),
            message: message.into(),
        }
    }

    /// Creates a new CommitFailure error
    pub fn commit_failure(step: impl Into<String>, source: CommandError) -> Self {
        UpdateError::CommitFailure {
            step: step.into(),
            source,
        }
    }
}
