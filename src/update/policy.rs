//! Update policy configuration
//!
//! This module provides the UpdatePolicy struct that encapsulates
//! the semver breadth of an update and the optional package scope.

use serde::Serialize;
use std::fmt;

/// How far a dependency may move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Newest patch within the wanted major.minor
    Patch,
    /// Newest minor/patch within the wanted major
    #[default]
    Minor,
    /// Latest published version
    Major,
}

impl UpdateMode {
    /// Pick the mode from command-line flags.
    ///
    /// `major` wins over `patch`; with neither flag the mode is `minor`.
    pub fn from_flags(major: bool, patch: bool) -> Self {
        if major {
            UpdateMode::Major
        } else if patch {
            UpdateMode::Patch
        } else {
            UpdateMode::Minor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateMode::Patch => "patch",
            UpdateMode::Minor => "minor",
            UpdateMode::Major => "major",
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy applied to every outdated dependency
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePolicy {
    /// Update breadth
    pub mode: UpdateMode,
    /// If set, only packages whose name starts with this string are updated
    pub prefix: Option<String>,
}

impl UpdatePolicy {
    /// Create a policy with default settings (minor, no scope)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the update mode
    pub fn with_mode(mut self, mode: UpdateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the name prefix; an empty prefix means no scope
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = if prefix.is_empty() { None } else { Some(prefix) };
        self
    }

    /// Check if a package falls inside the configured scope
    pub fn in_scope(&self, module_name: &str) -> bool {
        match &self.prefix {
            Some(prefix) => module_name.starts_with(prefix.as_str()),
            None => true,
        }
    }
}
