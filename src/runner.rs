//! External command execution
//!
//! This module provides:
//! - The `CommandRunner` trait every npm/git interaction goes through
//! - `SystemCommandRunner`, which spawns real processes with tokio

use crate::error::CommandError;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output from the command
    pub stdout: String,
    /// Standard error from the command
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// Trait for running external programs
///
/// A failing exit status is reported as `CommandError::Failed`, which still
/// carries whatever the program wrote to stdout and stderr.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and capture its output
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError>;
}

/// Render a program and its arguments as a single line for messages
pub fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Default runner that executes real commands in a project directory
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    working_dir: PathBuf,
}

impl SystemCommandRunner {
    /// Create a runner that executes commands in `working_dir`
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    #[instrument(skip(self, args), fields(args = %args.join(" ")))]
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        let line = command_line(program, args);
        debug!(command = %line, dir = %self.working_dir.display(), "exec");

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.working_dir)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CommandError::spawn(&line, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            debug!(command = %line, "exec succeeded");
            Ok(CommandOutput { stdout, stderr })
        } else {
            debug!(command = %line, status = ?output.status.code(), "exec failed");
            Err(CommandError::failed(line, output.status.code(), stdout, stderr))
        }
    }
}
