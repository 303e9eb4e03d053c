//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Human-readable update result display with colors
//! - Semantic version change type indication (major/minor/patch)
//! - Production vs development dependency grouping

use crate::domain::{DependencyKind, ResolvedDependency};
use crate::orchestrator::{RunOutcome, RunReport};
use crate::output::{OutputFormatter, Verbosity};
use crate::update::parse_wanted;
use colored::Colorize;
use std::io::Write;

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Unknown or unparseable
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between two versions
    pub fn from_versions(old: &str, new: &str) -> Self {
        match (parse_wanted(old), parse_wanted(new)) {
            (Some(old), Some(new)) => {
                if new.major != old.major {
                    VersionChangeType::Major
                } else if new.minor != old.minor {
                    VersionChangeType::Minor
                } else {
                    VersionChangeType::Patch
                }
            }
            _ => VersionChangeType::Unknown,
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionChangeType::Major => "major".red().bold().to_string(),
            VersionChangeType::Minor => "minor".yellow().to_string(),
            VersionChangeType::Patch => "patch".green().to_string(),
            VersionChangeType::Unknown => "?".dimmed().to_string(),
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Unknown => "?",
        }
    }
}

fn dependencies_noun(count: usize) -> &'static str {
    if count == 1 {
        "dependency"
    } else {
        "dependencies"
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self, dry_run: bool) -> String {
        if !dry_run {
            String::new()
        } else if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    fn format_header(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let count = report.batch.len();
        let noun = dependencies_noun(count);

        match report.outcome() {
            RunOutcome::UpToDate => {
                if self.color {
                    writeln!(writer, "{}", "dependencies are up to date".green())
                } else {
                    writeln!(writer, "dependencies are up to date")
                }
            }
            RunOutcome::Planned => {
                let prefix = self.dry_run_prefix(true);
                if self.color {
                    writeln!(
                        writer,
                        "{}would update {} {}",
                        prefix,
                        count.to_string().green(),
                        noun
                    )
                } else {
                    writeln!(writer, "{}would update {} {}", prefix, count, noun)
                }
            }
            RunOutcome::Updated => {
                if self.color {
                    writeln!(writer, "updated {} {}", count.to_string().green(), noun)
                } else {
                    writeln!(writer, "updated {} {}", count, noun)
                }
            }
        }
    }

    /// Format a single update line
    fn format_update_line(
        &self,
        dependency: &ResolvedDependency,
        max_name_len: usize,
        max_from_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let from = dependency.record.from_version();
        let to = dependency.install.as_str();
        let change_type = VersionChangeType::from_versions(from, to);

        if self.color {
            let name_display =
                format!("{:width$}", dependency.module_name(), width = max_name_len);
            let from_display = format!("{:width$}", from, width = max_from_len);
            writeln!(
                writer,
                "    {} {} {} {} [{}]",
                name_display,
                from_display.dimmed(),
                "→".dimmed(),
                to.bright_white().bold(),
                change_type.colored_label()
            )
        } else {
            writeln!(
                writer,
                "    {:name_width$} {:from_width$} -> {} [{}]",
                dependency.module_name(),
                from,
                to,
                change_type.label(),
                name_width = max_name_len,
                from_width = max_from_len
            )
        }
    }

    /// Format one dependency set under its section title
    fn format_group(
        &self,
        kind: DependencyKind,
        group: &[ResolvedDependency],
        max_name_len: usize,
        max_from_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if group.is_empty() {
            return Ok(());
        }

        if self.color {
            writeln!(writer, "  {}:", kind.as_str().bold())?;
        } else {
            writeln!(writer, "  {}:", kind)?;
        }
        for dependency in group {
            self.format_update_line(dependency, max_name_len, max_from_len, writer)?;
        }
        Ok(())
    }

    /// Extra details shown with --verbose
    fn format_details(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let skipped = report.outdated.saturating_sub(report.batch.len());
        let details = format!(
            "{} outdated, {} skipped by {} policy",
            report.outdated, skipped, report.mode
        );
        if self.color {
            writeln!(writer, "  {}", details.dimmed())?;
        } else {
            writeln!(writer, "  {}", details)?;
        }

        for command in &report.install.commands {
            if self.color {
                writeln!(writer, "  {} {}", "ran".dimmed(), command)?;
            } else {
                writeln!(writer, "  ran {}", command)?;
            }
        }
        if report.committed {
            writeln!(writer, "  committed package.json and package-lock.json")?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        self.format_header(report, writer)?;

        // In quiet mode, only show the header
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        let max_name_len = report
            .batch
            .iter()
            .map(|d| d.module_name().len())
            .max()
            .unwrap_or(0);
        let max_from_len = report
            .batch
            .iter()
            .map(|d| d.record.from_version().len())
            .max()
            .unwrap_or(0);

        self.format_group(
            DependencyKind::Dependencies,
            &report.batch.dependencies,
            max_name_len,
            max_from_len,
            writer,
        )?;
        self.format_group(
            DependencyKind::DevDependencies,
            &report.batch.dev_dependencies,
            max_name_len,
            max_from_len,
            writer,
        )?;

        if self.verbosity == Verbosity::Verbose {
            self.format_details(report, writer)?;
        }

        Ok(())
    }
}
