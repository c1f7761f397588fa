//! Integration tests for CLI failure paths.
//!
//! These exercise the binary end to end without reaching the network: bad
//! arguments, unconfigured datasets, and missing manifests all fail before
//! any request is made. Clap usage errors land on stderr; runtime errors are
//! logged through the tracing subscriber, which writes to stdout.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bin() -> Command {
    Command::cargo_bin("dataset-downloader").unwrap()
}

#[test]
fn unknown_dataset_exits_nonzero_and_names_valid_choices() {
    bin()
        .arg("mystery")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("unknown dataset 'mystery'"))
        .stdout(predicate::str::contains("huron"));
}

#[test]
fn missing_dataset_argument_is_a_usage_error() {
    bin()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn out_of_range_max_retries_is_a_usage_error() {
    bin()
        .args(["huron", "--max-retries", "0"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn unconfigured_direct_dataset_fails_with_config_error() {
    let dir = TempDir::new().unwrap();
    bin()
        .args(["tartan", "--output-dir", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("no download URLs configured"));
}

#[test]
fn missing_manifest_fails_before_downloading() {
    let dir = TempDir::new().unwrap();
    bin()
        .args([
            "scand",
            "--output-dir",
            dir.path().to_str().unwrap(),
            "--manifest",
            "/definitely/not/here.txt",
        ])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("cannot read"));
}

#[test]
fn output_directory_is_created_even_on_failure() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("nested").join("datasets");
    bin()
        .args(["tartan", "--output-dir", out.to_str().unwrap()])
        .assert()
        .failure();
    assert!(out.is_dir());
}
