//! npmup - Policy-driven npm dependency updater library
//!
//! This library provides the update pipeline behind the `npmup` CLI:
//! - Pruning and fetching the outdated set (`npm outdated`)
//! - Resolving install versions per patch/minor/major policy (`npm view`)
//! - Installing production and development sets separately
//! - Committing package.json and package-lock.json with git

pub mod cli;
pub mod domain;
pub mod error;
pub mod git;
pub mod orchestrator;
pub mod output;
pub mod package_manager;
pub mod progress;
pub mod runner;
pub mod update;
