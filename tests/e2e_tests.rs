//! End-to-end tests for the npmup CLI
//!
//! These tests verify:
//! - Help and version output
//! - Project directory validation before any command is spawned
//! - Argument validation and exit codes

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn npmup() -> Command {
    Command::cargo_bin("npmup").expect("binary should be built")
}

#[test]
fn test_help_lists_options() {
    npmup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--major"))
        .stdout(predicate::str::contains("--minor"))
        .stdout(predicate::str::contains("--patch"))
        .stdout(predicate::str::contains("--prefix"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_version() {
    npmup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("does-not-exist");

    npmup()
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: "))
        .stderr(predicate::str::contains("directory not found"));
}

#[test]
fn test_missing_manifest_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("README.md"), "# not a node project\n").unwrap();

    npmup()
        .arg(temp_dir.path())
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("package.json not found"));
}

#[test]
fn test_zero_concurrency_is_rejected() {
    let temp_dir = TempDir::new().unwrap();

    npmup()
        .arg(temp_dir.path())
        .args(["--concurrency", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("concurrency must be at least 1"));
}
