//! JSON output formatter for machine processing

use crate::domain::ResolvedDependency;
use crate::orchestrator::RunReport;
use crate::output::{OutputFormatter, Verbosity, VersionChangeType};
use crate::update::UpdateMode;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Update mode (patch, minor, major)
    mode: UpdateMode,
    /// Whether this was a dry-run
    dry_run: bool,
    /// Whether any install command ran
    installed: bool,
    /// Whether a commit was created
    committed: bool,
    /// Number of outdated dependencies reported (verbose only)
    #[serde(skip_serializing_if = "Option::is_none")]
    outdated: Option<usize>,
    /// Install commands that ran (verbose only)
    #[serde(skip_serializing_if = "Option::is_none")]
    commands: Option<&'a [String]>,
    dependencies: Vec<JsonUpdate<'a>>,
    #[serde(rename = "devDependencies")]
    dev_dependencies: Vec<JsonUpdate<'a>>,
}

/// JSON representation of an update
#[derive(Serialize)]
struct JsonUpdate<'a> {
    /// Package name
    name: &'a str,
    /// Installed (or wanted) version
    from: &'a str,
    /// Version selected for installation
    to: &'a str,
    /// major, minor, patch or ?
    change: &'static str,
}

impl<'a> JsonUpdate<'a> {
    fn from_dependency(dependency: &'a ResolvedDependency) -> Self {
        let from = dependency.record.from_version();
        Self {
            name: dependency.module_name(),
            from,
            to: &dependency.install,
            change: VersionChangeType::from_versions(from, &dependency.install).label(),
        }
    }
}

impl JsonFormatter {
    fn to_json<'a>(&self, report: &'a RunReport) -> JsonOutput<'a> {
        let verbose = self.verbosity == Verbosity::Verbose;

        JsonOutput {
            mode: report.mode,
            dry_run: report.dry_run,
            installed: !report.install.is_empty(),
            committed: report.committed,
            outdated: verbose.then_some(report.outdated),
            commands: verbose.then_some(report.install.commands.as_slice()),
            dependencies: report
                .batch
                .dependencies
                .iter()
                .map(JsonUpdate::from_dependency)
                .collect(),
            dev_dependencies: report
                .batch
                .dev_dependencies
                .iter()
                .map(JsonUpdate::from_dependency)
                .collect(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = self.to_json(report);
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        writeln!(writer, "{}", json)
    }
}
