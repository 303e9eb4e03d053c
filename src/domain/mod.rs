//! Core domain models for npmup
//!
//! This module contains the fundamental types used throughout the application:
//! - Outdated dependency records as reported by npm
//! - Resolved dependencies carrying the version to install
//! - The production/development update batch

mod batch;
mod dependency;

pub use batch::UpdateBatch;
pub use dependency::{DependencyKind, DependencyRecord, ResolvedDependency};
