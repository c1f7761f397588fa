//! Unit tests for CLI argument parsing

use clap::Parser;
use dataset_downloader::cli::Cli;
use std::path::PathBuf;

#[test]
fn defaults_apply_without_flags() {
    let cli = Cli::parse_from(["dataset-downloader", "huron"]);
    assert_eq!(cli.dataset, "huron");
    assert_eq!(cli.output_dir, PathBuf::from("datasets"));
    assert!(!cli.process);
    assert_eq!(cli.max_retries, 5);
    assert!(cli.manifest.is_none());
}

#[test]
fn flags_override_defaults() {
    let cli = Cli::parse_from([
        "dataset-downloader",
        "all",
        "--output-dir",
        "/tmp/out",
        "--process",
        "--max-retries",
        "3",
        "--manifest",
        "wanted.txt",
    ]);
    assert_eq!(cli.dataset, "all");
    assert_eq!(cli.output_dir, PathBuf::from("/tmp/out"));
    assert!(cli.process);
    assert_eq!(cli.max_retries, 3);
    assert_eq!(cli.manifest, Some(PathBuf::from("wanted.txt")));
}

#[test]
fn max_retries_is_range_checked() {
    assert!(Cli::try_parse_from(["dataset-downloader", "huron", "--max-retries", "0"]).is_err());
    assert!(Cli::try_parse_from(["dataset-downloader", "huron", "--max-retries", "21"]).is_err());
    assert!(Cli::try_parse_from(["dataset-downloader", "huron", "--max-retries", "1"]).is_ok());
    assert!(Cli::try_parse_from(["dataset-downloader", "huron", "--max-retries", "20"]).is_ok());
}

#[test]
fn dataset_argument_is_required() {
    assert!(Cli::try_parse_from(["dataset-downloader"]).is_err());
}
