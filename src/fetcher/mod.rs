//! Remote data retrieval: transfer primitive, retry policy, index crawler,
//! and Dataverse catalog matching.
//!
//! Everything here is network- or filesystem-facing. Per-file failures are
//! converted into reported outcomes at the call sites; only dataset-level
//! failures (unreachable root listing, unreachable catalog, unreadable
//! manifest) propagate as errors.

use std::path::PathBuf;
use url::Url;

pub mod catalog;
pub mod crawler;
pub mod dataverse;
pub mod listing;
pub mod manifest;
pub mod retry;
pub mod transfer;

/// Archive suffix shared by all supported sources. Index crawling and
/// manifest validation both key off it.
pub const ARCHIVE_SUFFIX: &str = ".bag";

/// Fetcher errors
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// A listing or catalog page could not be retrieved at all. Fatal for
    /// the affected dataset's run.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// A single file failed to download. Subject to retry; exhaustion is a
    /// per-file failure, not fatal to the batch.
    #[error("transfer error: {0}")]
    Transfer(String),

    /// The wanted-files list is missing or empty. Fatal, nothing to do.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// A response was retrieved but could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// A URL could not be constructed or resolved.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// A single discoverable remote file: produced by the crawler or the catalog
/// matcher, consumed exactly once by the transfer stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Remote filename (no path components).
    pub filename: String,
    /// Fully resolved download URL.
    pub url: Url,
    /// Destination path on disk, including any routing sub-directory.
    pub dest: PathBuf,
}
