//! # Dataset Downloader Library
//!
//! A command-line utility and library for fetching publicly hosted
//! vision-robotics datasets into a local directory tree. Aimed at researchers
//! who need a one-shot, repeatable way to populate a `datasets/` folder before
//! training or evaluating models. Responsibility ends at "bytes on disk,
//! correctly named and organized".
//!
//! ## Features
//!
//! - **Index crawling**: Walks HTTP directory-listing pages, discovers
//!   sub-folders, and downloads every archive file they contain
//! - **Manifest-driven selection**: Cross-references a wanted-file list
//!   against a Dataverse dataset catalog and downloads only the matching
//!   subset
//! - **Resilient transfers**: Streaming downloads with bounded memory use,
//!   exponential-backoff retry, and temp-file staging so failures never
//!   leave truncated files under the final name
//! - **Batch isolation**: Failure of one dataset's retrieval never blocks
//!   or corrupts the others
//!
//! ## Quick Start
//!
//! ```no_run
//! use dataset_downloader::downloader::{create_downloader, DownloadConfig, DownloadContext};
//! use dataset_downloader::registry::DatasetId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = DownloadContext::new(DownloadConfig::default());
//! let downloader = create_downloader(DatasetId::Huron);
//! let report = downloader.download(&ctx).await?;
//! println!("{} files downloaded", report.succeeded_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`registry`] - Enumerated dataset identifiers and static source
//!   configuration
//! - [`fetcher`] - Transfer primitive, retry policy, index crawler, and
//!   Dataverse catalog matcher
//! - [`downloader`] - Download orchestration, outcome aggregation, and
//!   run summaries
//! - [`cli`] - CLI argument parsing and dispatch
//! - [`process`] - Post-download processing hook (extension point)
//! - [`shutdown`] - Cooperative cancellation shared across modules
//!
//! Downloads are sequential within a run: one file transfer completes
//! (success or exhausted retries) before the next begins.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// CLI command implementations
pub mod cli;

/// Download orchestration
pub mod downloader;

/// Transfer, retry, crawling, and catalog matching
pub mod fetcher;

/// Post-download processing hook
pub mod process;

/// Dataset identifiers and source configuration
pub mod registry;

/// Graceful shutdown coordination shared across modules
pub mod shutdown;

// Re-export commonly used types
pub use downloader::{DownloadConfig, DownloadContext, DownloadError};
pub use registry::{DatasetId, DatasetSelection};
