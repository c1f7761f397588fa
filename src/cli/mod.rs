//! Command-line interface.

mod download;
mod error;

pub use error::CliError;

use clap::Parser;
use std::path::PathBuf;

use crate::downloader::config::{DEFAULT_OUTPUT_DIR, MAX_RETRIES};

/// Download robot navigation datasets.
#[derive(Debug, Parser)]
#[command(name = "dataset-downloader", version, about)]
pub struct Cli {
    /// Dataset to download: huron, scand, tartan, go_stanford, recon, or
    /// "all" for every dataset.
    pub dataset: String,

    /// Directory datasets are downloaded into, one sub-directory per
    /// dataset.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Run the post-download processing hook on each dataset that
    /// succeeded.
    #[arg(long)]
    pub process: bool,

    /// Attempts per file before giving up.
    #[arg(long, default_value_t = MAX_RETRIES, value_parser = clap::value_parser!(u32).range(1..=20))]
    pub max_retries: u32,

    /// Path to the wanted-files manifest for catalog datasets.
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

pub use download::execute;
