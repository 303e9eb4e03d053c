//! Outdated dependency records and their resolved counterparts

use serde::Serialize;
use std::fmt;

/// Which manifest section a dependency is declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DependencyKind {
    /// `dependencies` in package.json
    #[default]
    #[serde(rename = "dependencies")]
    Dependencies,
    /// `devDependencies` in package.json
    #[serde(rename = "devDependencies")]
    DevDependencies,
}

impl DependencyKind {
    /// Classify the `type` tag reported by `npm outdated`.
    ///
    /// Anything other than `devDependencies` (including a missing tag)
    /// lands in the production set.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("devDependencies") => DependencyKind::DevDependencies,
            _ => DependencyKind::Dependencies,
        }
    }

    /// The manifest section name
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Dependencies => "dependencies",
            DependencyKind::DevDependencies => "devDependencies",
        }
    }

    /// The `npm install` flag that saves into this section
    pub fn save_flag(&self) -> &'static str {
        match self {
            DependencyKind::Dependencies => "--save",
            DependencyKind::DevDependencies => "--save-dev",
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, DependencyKind::DevDependencies)
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outdated dependency as reported by the package manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyRecord {
    /// Package name, possibly scoped (`@scope/name`)
    pub module_name: String,
    /// Installed version, when the package is installed at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    /// Version permitted by the manifest range (not necessarily semver)
    pub wanted: String,
    /// Newest published version
    pub latest: String,
    /// Manifest section
    #[serde(rename = "type")]
    pub kind: DependencyKind,
}

impl DependencyRecord {
    /// Creates a new record
    pub fn new(
        module_name: impl Into<String>,
        wanted: impl Into<String>,
        latest: impl Into<String>,
        kind: DependencyKind,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            current: None,
            wanted: wanted.into(),
            latest: latest.into(),
            kind,
        }
    }

    /// Sets the installed version (builder pattern)
    pub fn with_current(mut self, current: Option<String>) -> Self {
        self.current = current;
        self
    }

    /// The version to show as the starting point of an update
    pub fn from_version(&self) -> &str {
        self.current.as_deref().unwrap_or(&self.wanted)
    }

    /// Attach the version selected for installation
    pub fn resolve(self, install: impl Into<String>) -> ResolvedDependency {
        ResolvedDependency {
            record: self,
            install: install.into(),
        }
    }
}

impl fmt::Display for DependencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dev_marker = if self.kind.is_dev() { " (dev)" } else { "" };
        write!(
            f,
            "{} wanted {} latest {}{}",
            self.module_name, self.wanted, self.latest, dev_marker
        )
    }
}

/// A record together with the concrete version chosen for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDependency {
    #[serde(flatten)]
    pub record: DependencyRecord,
    /// Version to install, never a range
    pub install: String,
}

impl ResolvedDependency {
    pub fn module_name(&self) -> &str {
        &self.record.module_name
    }

    pub fn kind(&self) -> DependencyKind {
        self.record.kind
    }

    /// `name@version` as passed to `npm install`
    pub fn install_spec(&self) -> String {
        format!("{}@{}", self.record.module_name, self.install)
    }
}

impl fmt::Display for ResolvedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} → {}",
            self.record.module_name,
            self.record.from_version(),
            self.install
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(
            DependencyKind::from_tag(Some("devDependencies")),
            DependencyKind::DevDependencies
        );
        assert_eq!(
            DependencyKind::from_tag(Some("dependencies")),
            DependencyKind::Dependencies
        );
        assert_eq!(
            DependencyKind::from_tag(Some("optionalDependencies")),
            DependencyKind::Dependencies
        );
        assert_eq!(DependencyKind::from_tag(None), DependencyKind::Dependencies);
    }

    #[test]
    fn test_kind_save_flag() {
        assert_eq!(DependencyKind::Dependencies.save_flag(), "--save");
        assert_eq!(DependencyKind::DevDependencies.save_flag(), "--save-dev");
    }

    #[test]
    fn test_from_version_prefers_current() {
        let record = DependencyRecord::new("lodash", "4.17.20", "4.17.21", DependencyKind::Dependencies);
        assert_eq!(record.from_version(), "4.17.20");

        let record = record.with_current(Some("4.17.19".to_string()));
        assert_eq!(record.from_version(), "4.17.19");
    }

    #[test]
    fn test_install_spec_scoped() {
        let resolved = DependencyRecord::new(
            "@types/node",
            "20.1.0",
            "22.0.0",
            DependencyKind::DevDependencies,
        )
        .resolve("20.19.0");
        assert_eq!(resolved.install_spec(), "@types/node@20.19.0");
        assert_eq!(resolved.kind(), DependencyKind::DevDependencies);
    }

    #[test]
    fn test_display() {
        let resolved =
            DependencyRecord::new("react", "18.2.0", "19.0.0", DependencyKind::Dependencies)
                .resolve("18.3.1");
        assert_eq!(format!("{}", resolved), "react: 18.2.0 → 18.3.1");
    }

    #[test]
    fn test_serde_resolved_dependency_shape() {
        let resolved =
            DependencyRecord::new("moduleA", "2.0.0", "3.0.0", DependencyKind::Dependencies)
                .resolve("2.3.0");
        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["module_name"], "moduleA");
        assert_eq!(json["type"], "dependencies");
        assert_eq!(json["install"], "2.3.0");
        assert!(json.get("current").is_none());
    }
}
