//! Git commit of the updated manifest files

use crate::error::UpdateError;
use crate::runner::CommandRunner;
use tracing::{info, instrument};

/// Files rewritten by `npm install`, staged one by one
pub const MANIFEST_FILES: [&str; 2] = ["package.json", "package-lock.json"];

/// Message used for every update commit
pub const COMMIT_MESSAGE: &str = "updated dependencies";

/// Stage package.json and package-lock.json and commit them.
///
/// Nothing is rolled back on failure; the installed dependencies and any
/// already staged file stay as they are.
#[instrument(skip(runner))]
pub async fn commit<R>(runner: &R) -> Result<(), UpdateError>
where
    R: CommandRunner + ?Sized,
{
    for file in MANIFEST_FILES {
        runner
            .run("git", &["add", file])
            .await
            .map_err(|e| UpdateError::commit_failure(format!("stage {}", file), e))?;
    }

    runner
        .run("git", &["commit", "-m", COMMIT_MESSAGE])
        .await
        .map_err(|e| UpdateError::commit_failure("commit", e))?;

    info!("committed manifest changes");
    Ok(())
}
