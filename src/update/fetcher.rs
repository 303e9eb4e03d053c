//! Outdated dependency fetcher
//!
//! Runs `npm outdated --depth=0 -l --json` and turns its
//! `moduleName -> {current, wanted, latest, type}` mapping into records.

use crate::domain::{DependencyKind, DependencyRecord};
use crate::error::UpdateError;
use crate::runner::CommandRunner;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

/// Arguments passed to npm to list outdated dependencies
pub const OUTDATED_ARGS: [&str; 4] = ["outdated", "--depth=0", "-l", "--json"];

/// One value of the `npm outdated --json` mapping
#[derive(Debug, Deserialize)]
struct OutdatedEntry {
    #[serde(default)]
    current: Option<String>,
    #[serde(default)]
    wanted: Option<String>,
    #[serde(default)]
    latest: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// Fetch the outdated dependency set, in the order npm reports it.
///
/// `npm outdated` exits with status 1 whenever something is outdated, so a
/// failed run that still printed output is parsed like a successful one.
#[instrument(skip(runner))]
pub async fn fetch_outdated<R>(runner: &R) -> Result<Vec<DependencyRecord>, UpdateError>
where
    R: CommandRunner + ?Sized,
{
    let stdout = match runner.run("npm", &OUTDATED_ARGS).await {
        Ok(output) => output.stdout,
        Err(err) if !err.stdout().trim().is_empty() => {
            debug!("npm outdated exited unsuccessfully with output, using it");
            err.stdout().to_string()
        }
        Err(err) => return Err(UpdateError::FetchFailure(err)),
    };

    let records = parse_outdated(&stdout)?;
    debug!(count = records.len(), "outdated dependencies");
    Ok(records)
}

/// Parse `npm outdated --json` output.
///
/// Blank output means nothing is outdated.
pub fn parse_outdated(stdout: &str) -> Result<Vec<DependencyRecord>, UpdateError> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }

    let data: Map<String, Value> = serde_json::from_str(stdout)
        .map_err(|e| UpdateError::malformed_outdated(e.to_string()))?;

    data.into_iter()
        .map(|(module_name, value)| {
            let entry: OutdatedEntry = serde_json::from_value(value).map_err(|e| {
                UpdateError::malformed_outdated(format!("entry '{}': {}", module_name, e))
            })?;
            let record = DependencyRecord::new(
                module_name,
                entry.wanted.unwrap_or_default(),
                entry.latest.unwrap_or_default(),
                DependencyKind::from_tag(entry.kind.as_deref()),
            );
            Ok(record.with_current(entry.current))
        })
        .collect()
}
