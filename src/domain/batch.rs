//! Classification result: production and development update sets

use super::{DependencyKind, ResolvedDependency};
use serde::Serialize;

/// Dependencies selected for installation, split by manifest section.
///
/// Both lists keep the order in which `npm outdated` reported the packages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateBatch {
    pub dependencies: Vec<ResolvedDependency>,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Vec<ResolvedDependency>,
}

impl UpdateBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the list matching the dependency's section
    pub fn push(&mut self, dependency: ResolvedDependency) {
        match dependency.kind() {
            DependencyKind::Dependencies => self.dependencies.push(dependency),
            DependencyKind::DevDependencies => self.dev_dependencies.push(dependency),
        }
    }

    /// The list for one section
    pub fn bucket(&self, kind: DependencyKind) -> &[ResolvedDependency] {
        match kind {
            DependencyKind::Dependencies => &self.dependencies,
            DependencyKind::DevDependencies => &self.dev_dependencies,
        }
    }

    /// Returns true if neither list has entries
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }

    /// Total number of dependencies in both lists
    pub fn len(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }

    /// Production entries first, then development entries
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedDependency> {
        self.dependencies.iter().chain(self.dev_dependencies.iter())
    }
}

impl Extend<ResolvedDependency> for UpdateBatch {
    fn extend<I: IntoIterator<Item = ResolvedDependency>>(&mut self, iter: I) {
        for dependency in iter {
            self.push(dependency);
        }
    }
}

impl FromIterator<ResolvedDependency> for UpdateBatch {
    fn from_iter<I: IntoIterator<Item = ResolvedDependency>>(iter: I) -> Self {
        let mut batch = UpdateBatch::new();
        batch.extend(iter);
        batch
    }
}
