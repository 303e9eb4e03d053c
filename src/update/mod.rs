//! Update-policy resolution engine
//!
//! This module provides:
//! - Update policy configuration (mode and package scope)
//! - The outdated dependency fetcher
//! - The version resolver
//! - The classifier that turns outdated records into an update batch

mod fetcher;
mod policy;
mod resolver;

pub use fetcher::{fetch_outdated, parse_outdated, OUTDATED_ARGS};
pub use policy::{UpdateMode, UpdatePolicy};
pub use resolver::{parse_version_list, parse_wanted, query_range, VersionResolver};

use crate::domain::{DependencyRecord, UpdateBatch};
use crate::error::UpdateError;
use crate::runner::CommandRunner;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, instrument};

/// Default number of concurrent `npm view` queries
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Classifies outdated records into production and development updates
pub struct UpdateClassifier<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    policy: UpdatePolicy,
    concurrency: usize,
}

impl<'a, R: CommandRunner + ?Sized> UpdateClassifier<'a, R> {
    /// Create a new classifier with the given policy
    pub fn new(runner: &'a R, policy: UpdatePolicy) -> Self {
        Self {
            runner,
            policy,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Set how many version queries may run at once (at least one)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Check if a record takes part in the update at all.
    ///
    /// Records whose wanted version is not semver (linked packages, git
    /// dependencies, tags) and records outside the prefix scope are dropped.
    pub fn is_candidate(&self, record: &DependencyRecord) -> bool {
        if parse_wanted(&record.wanted).is_none() {
            debug!(
                package = %record.module_name,
                wanted = %record.wanted,
                "skipping non-semver wanted version"
            );
            return false;
        }
        self.policy.in_scope(&record.module_name)
    }

    /// Resolve every candidate and split the results by manifest section.
    ///
    /// Queries run concurrently but results keep the input order. The first
    /// resolution error aborts the whole batch.
    #[instrument(skip(self, records), fields(mode = %self.policy.mode, count = records.len()))]
    pub async fn classify(
        &self,
        records: Vec<DependencyRecord>,
    ) -> Result<UpdateBatch, UpdateError> {
        let candidates: Vec<DependencyRecord> = records
            .into_iter()
            .filter(|record| self.is_candidate(record))
            .collect();

        if candidates.is_empty() {
            return Ok(UpdateBatch::new());
        }

        let resolver = VersionResolver::new(self.runner, self.policy.mode);
        let resolver = &resolver;

        stream::iter(candidates)
            .map(|record| async move {
                let install = resolver.resolve(&record).await?;
                Ok::<_, UpdateError>(record.resolve(install))
            })
            .buffered(self.concurrency)
            .try_collect::<UpdateBatch>()
            .await
    }
}
