//! npm integration for pruning and installing dependencies
//!
//! This module provides:
//! - `npm prune` before the outdated check
//! - One `npm install --save`/`--save-dev` per non-empty dependency set

use crate::domain::{DependencyKind, UpdateBatch};
use crate::error::UpdateError;
use crate::runner::{command_line, CommandRunner};
use tracing::{info, instrument};

/// Result of installing an update batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// The install commands that were executed, in order
    pub commands: Vec<String>,
}

impl InstallReport {
    /// Returns true if no install command was needed
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Remove extraneous packages from node_modules
#[instrument(skip(runner))]
pub async fn prune<R>(runner: &R) -> Result<(), UpdateError>
where
    R: CommandRunner + ?Sized,
{
    runner
        .run("npm", &["prune"])
        .await
        .map_err(UpdateError::Prune)?;
    Ok(())
}

/// Build the `npm install` arguments for one dependency set
pub fn install_args(batch: &UpdateBatch, kind: DependencyKind) -> Option<Vec<String>> {
    let bucket = batch.bucket(kind);
    if bucket.is_empty() {
        return None;
    }

    let mut args = Vec::with_capacity(bucket.len() + 2);
    args.push("install".to_string());
    args.push(kind.save_flag().to_string());
    args.extend(bucket.iter().map(|dependency| dependency.install_spec()));
    Some(args)
}

/// Install the production set, then the development set.
///
/// Empty sets issue no command. The first failure aborts the rest.
#[instrument(skip(runner, batch), fields(count = batch.len()))]
pub async fn install<R>(runner: &R, batch: &UpdateBatch) -> Result<InstallReport, UpdateError>
where
    R: CommandRunner + ?Sized,
{
    let mut report = InstallReport::default();

    for kind in [DependencyKind::Dependencies, DependencyKind::DevDependencies] {
        let Some(args) = install_args(batch, kind) else {
            continue;
        };
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        runner
            .run("npm", &args)
            .await
            .map_err(|source| UpdateError::InstallFailure { kind, source })?;

        let command = command_line("npm", &args);
        info!(%command, "installed {}", kind);
        report.commands.push(command);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DependencyRecord;
    use crate::runner::testing::ScriptedRunner;

    fn sample_batch() -> UpdateBatch {
        vec![
            DependencyRecord::new("moduleA", "2.0.0", "3.0.0", DependencyKind::Dependencies)
                .resolve("2.3.0"),
            DependencyRecord::new("@scope/b", "1.0.0", "4.0.0", DependencyKind::Dependencies)
                .resolve("1.1.0"),
            DependencyRecord::new(
                "devModule",
                "42.0.0",
                "1337.0.0",
                DependencyKind::DevDependencies,
            )
            .resolve("42.2.0"),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn test_prune() {
        let runner = ScriptedRunner::new();
        prune(&runner).await.unwrap();
        assert_eq!(runner.calls(), vec!["npm prune"]);
    }

    #[tokio::test]
    async fn test_prune_failure() {
        let runner = ScriptedRunner::new().fail("npm prune", "");
        let err = prune(&runner).await.unwrap_err();
        assert!(matches!(err, UpdateError::Prune(_)));
    }

    #[test]
    fn test_install_args() {
        let batch = sample_batch();
        assert_eq!(
            install_args(&batch, DependencyKind::Dependencies).unwrap(),
            vec!["install", "--save", "moduleA@2.3.0", "@scope/b@1.1.0"]
        );
        assert_eq!(
            install_args(&batch, DependencyKind::DevDependencies).unwrap(),
            vec!["install", "--save-dev", "devModule@42.2.0"]
        );
        assert!(install_args(&UpdateBatch::new(), DependencyKind::Dependencies).is_none());
    }

    #[tokio::test]
    async fn test_install_both_sets() {
        let runner = ScriptedRunner::new();
        let report = install(&runner, &sample_batch()).await.unwrap();

        let expected = vec![
            "npm install --save moduleA@2.3.0 @scope/b@1.1.0",
            "npm install --save-dev devModule@42.2.0",
        ];
        assert_eq!(runner.calls(), expected);
        assert_eq!(report.commands, expected);
    }

    #[tokio::test]
    async fn test_install_nothing_when_empty() {
        let runner = ScriptedRunner::new();
        let report = install(&runner, &UpdateBatch::new()).await.unwrap();
        assert!(report.is_empty());
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_install_dev_only() {
        let batch: UpdateBatch = vec![DependencyRecord::new(
            "jest",
            "29.0.0",
            "30.0.0",
            DependencyKind::DevDependencies,
        )
        .resolve("29.7.0")]
        .into_iter()
        .collect();

        let runner = ScriptedRunner::new();
        install(&runner, &batch).await.unwrap();
        assert_eq!(runner.calls(), vec!["npm install --save-dev jest@29.7.0"]);
    }

    #[tokio::test]
    async fn test_install_failure_stops_before_dev_set() {
        let runner = ScriptedRunner::new().fail("npm install --save moduleA@2.3.0 @scope/b@1.1.0", "");
        let err = install(&runner, &sample_batch()).await.unwrap_err();
        assert!(matches!(
            err,
            UpdateError::InstallFailure {
                kind: DependencyKind::Dependencies,
                ..
            }
        ));
        assert_eq!(runner.calls().len(), 1);
    }
}
