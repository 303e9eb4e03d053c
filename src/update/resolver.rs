//! Version resolution per update policy
//!
//! `major` installs `latest` as-is. `minor` and `patch` ask npm for every
//! published version inside a range derived from the wanted version
//! (`2` or `2.3.x` for wanted `2.3.1`) and take the highest one.

use crate::domain::DependencyRecord;
use crate::error::UpdateError;
use crate::runner::CommandRunner;
use crate::update::UpdateMode;
use semver::Version;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Parse a version the way npm's `semver.valid` accepts it.
///
/// Surrounding whitespace and a single leading `v` are tolerated.
/// Tags (`linked`, `latest`), git specifiers, ranges and `=1.2.3` are
/// rejected.
pub fn parse_wanted(version: &str) -> Option<Version> {
    let trimmed = version.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(bare).ok()
}

/// Range for `npm view` in `minor` or `patch` mode (`2` or `2.3.x` for
/// wanted `2.3.1`)
pub fn query_range(patch: bool, wanted: &Version) -> String {
    if patch {
        format!("{}.{}.x", wanted.major, wanted.minor)
    } else {
        wanted.major.to_string()
    }
}

/// `npm view ... version --json` prints an array, or a bare string when
/// exactly one version matches
#[derive(Deserialize)]
#[serde(untagged)]
enum VersionListing {
    Many(Vec<String>),
    One(String),
}

/// Parse `npm view` output into an ascending list of versions.
///
/// Blank output is an empty list.
pub fn parse_version_list(stdout: &str) -> Result<Vec<String>, serde_json::Error> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }

    let versions = match serde_json::from_str::<VersionListing>(stdout)? {
        VersionListing::Many(versions) => versions,
        VersionListing::One(version) if version.is_empty() => Vec::new(),
        VersionListing::One(version) => vec![version],
    };
    Ok(versions)
}

/// Computes the version to install for one outdated dependency
pub struct VersionResolver<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    mode: UpdateMode,
}

impl<'a, R: CommandRunner + ?Sized> VersionResolver<'a, R> {
    pub fn new(runner: &'a R, mode: UpdateMode) -> Self {
        Self { runner, mode }
    }

    /// Resolve the install version for `record`.
    ///
    /// For `minor`/`patch` the record's wanted version must be valid semver.
    #[instrument(skip(self, record), fields(package = %record.module_name, mode = %self.mode))]
    pub async fn resolve(&self, record: &DependencyRecord) -> Result<String, UpdateError> {
        let patch = match self.mode {
            UpdateMode::Major => return latest_version(record),
            UpdateMode::Minor => false,
            UpdateMode::Patch => true,
        };
        let wanted = parse_wanted(&record.wanted).ok_or_else(|| UpdateError::InvalidVersion {
            package: record.module_name.clone(),
            version: record.wanted.clone(),
        })?;
        let range = query_range(patch, &wanted);

        let spec = format!("{}@{}", record.module_name, range);
        let output = self
            .runner
            .run("npm", &["view", spec.as_str(), "version", "--json"])
            .await
            .map_err(|source| UpdateError::VersionQuery {
                package: record.module_name.clone(),
                range: range.clone(),
                source,
            })?;

        let versions = parse_version_list(&output.stdout).map_err(|e| {
            UpdateError::malformed_version_list(&record.module_name, &range, e.to_string())
        })?;

        match versions.last() {
            Some(install) => {
                debug!(%install, candidates = versions.len(), "resolved");
                Ok(install.clone())
            }
            None => Err(UpdateError::no_matching_version(&record.module_name, range)),
        }
    }
}

fn latest_version(record: &DependencyRecord) -> Result<String, UpdateError> {
    if record.latest.is_empty() {
        return Err(UpdateError::no_matching_version(&record.module_name, "latest"));
    }
    Ok(record.latest.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DependencyKind;
    use crate::runner::testing::ScriptedRunner;

    fn record(name: &str, wanted: &str, latest: &str) -> DependencyRecord {
        DependencyRecord::new(name, wanted, latest, DependencyKind::Dependencies)
    }

    #[test]
    fn test_parse_wanted_valid() {
        assert_eq!(parse_wanted("2.3.1"), Some(Version::new(2, 3, 1)));
        assert_eq!(parse_wanted("v2.3.1"), Some(Version::new(2, 3, 1)));
        assert_eq!(parse_wanted(" 2.3.1 "), Some(Version::new(2, 3, 1)));
        assert!(parse_wanted("1.0.0-beta.2").is_some());
    }

    #[test]
    fn test_parse_wanted_invalid() {
        assert!(parse_wanted("linked").is_none());
        assert!(parse_wanted("").is_none());
        assert!(parse_wanted("git+https://github.com/a/b.git").is_none());
        assert!(parse_wanted("^1.2.3").is_none());
        assert!(parse_wanted("1.2").is_none());
        assert!(parse_wanted("=1.2.3").is_none());
        assert!(parse_wanted("vv1.2.3").is_none());
    }

    #[test]
    fn test_query_range_minor_is_major_numeral() {
        let wanted = Version::new(2, 3, 1);
        assert_eq!(query_range(false, &wanted), "2");
    }

    #[test]
    fn test_query_range_patch_is_major_minor_x() {
        let wanted = Version::new(2, 3, 1);
        assert_eq!(query_range(true, &wanted), "2.3.x");
    }

    #[test]
    fn test_parse_version_list_array() {
        let versions = parse_version_list(r#"["2.1.0", "2.2.0", "2.3.0"]"#).unwrap();
        assert_eq!(versions, vec!["2.1.0", "2.2.0", "2.3.0"]);
    }

    #[test]
    fn test_parse_version_list_single_string() {
        let versions = parse_version_list("\"1.1.0\"\n").unwrap();
        assert_eq!(versions, vec!["1.1.0"]);
    }

    #[test]
    fn test_parse_version_list_empty_shapes() {
        assert!(parse_version_list("").unwrap().is_empty());
        assert!(parse_version_list("[]").unwrap().is_empty());
        assert!(parse_version_list("\"\"").unwrap().is_empty());
    }

    #[test]
    fn test_parse_version_list_rejects_objects() {
        assert!(parse_version_list(r#"{"error": {"code": "E404"}}"#).is_err());
    }

    #[tokio::test]
    async fn test_resolve_major_returns_latest_without_query() {
        let runner = ScriptedRunner::new();
        let resolver = VersionResolver::new(&runner, UpdateMode::Major);
        let install = resolver
            .resolve(&record("moduleA", "2.0.0", "3.0.0"))
            .await
            .unwrap();
        assert_eq!(install, "3.0.0");
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_major_ignores_wanted_validity() {
        let runner = ScriptedRunner::new();
        let resolver = VersionResolver::new(&runner, UpdateMode::Major);
        let install = resolver
            .resolve(&record("moduleA", "linked", "3.0.0"))
            .await
            .unwrap();
        assert_eq!(install, "3.0.0");
    }

    #[tokio::test]
    async fn test_resolve_minor_takes_last_listed() {
        let runner = ScriptedRunner::new().ok(
            "npm view moduleA@2 version --json",
            r#"["2.1.0","2.2.0","2.3.0"]"#,
        );
        let resolver = VersionResolver::new(&runner, UpdateMode::Minor);
        let install = resolver
            .resolve(&record("moduleA", "2.0.0", "3.0.0"))
            .await
            .unwrap();
        assert_eq!(install, "2.3.0");
        assert_eq!(runner.calls(), vec!["npm view moduleA@2 version --json"]);
    }

    #[tokio::test]
    async fn test_resolve_patch_query() {
        let runner = ScriptedRunner::new().ok(
            "npm view @scope/pkg@1.4.x version --json",
            r#"["1.4.2","1.4.9"]"#,
        );
        let resolver = VersionResolver::new(&runner, UpdateMode::Patch);
        let install = resolver
            .resolve(&record("@scope/pkg", "1.4.2", "2.0.0"))
            .await
            .unwrap();
        assert_eq!(install, "1.4.9");
    }

    #[tokio::test]
    async fn test_resolve_single_string_listing() {
        let runner = ScriptedRunner::new().ok("npm view moduleB@1 version --json", "\"1.1.0\"");
        let resolver = VersionResolver::new(&runner, UpdateMode::Minor);
        let install = resolver
            .resolve(&record("moduleB", "1.0.0", "4.0.0"))
            .await
            .unwrap();
        assert_eq!(install, "1.1.0");
    }

    #[tokio::test]
    async fn test_resolve_empty_listing_is_error() {
        let runner = ScriptedRunner::new().ok("npm view moduleB@1 version --json", "[]");
        let resolver = VersionResolver::new(&runner, UpdateMode::Minor);
        let err = resolver
            .resolve(&record("moduleB", "1.0.0", "4.0.0"))
            .await
            .unwrap_err();
        assert!(matches!(err, UpdateError::NoMatchingVersion { ref range, .. } if range == "1"));
    }

    #[tokio::test]
    async fn test_resolve_query_failure() {
        let runner = ScriptedRunner::new().fail("npm view ghost@1 version --json", "");
        let resolver = VersionResolver::new(&runner, UpdateMode::Minor);
        let err = resolver
            .resolve(&record("ghost", "1.0.0", "2.0.0"))
            .await
            .unwrap_err();
        assert!(matches!(err, UpdateError::VersionQuery { .. }));
    }

    #[tokio::test]
    async fn test_resolve_invalid_wanted() {
        let runner = ScriptedRunner::new();
        let resolver = VersionResolver::new(&runner, UpdateMode::Patch);
        let err = resolver
            .resolve(&record("local", "linked", "linked"))
            .await
            .unwrap_err();
        assert!(matches!(err, UpdateError::InvalidVersion { .. }));
        assert!(runner.calls().is_empty());
    }
}
