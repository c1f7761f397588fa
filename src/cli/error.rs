//! CLI error type.

use thiserror::Error;

use crate::downloader::DownloadError;
use crate::registry::RegistryError;

/// Errors surfaced to the user by the command-line entry point.
#[derive(Debug, Error)]
pub enum CliError {
    /// The dataset argument did not resolve.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A dataset download could not be attempted or aborted fatally.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Filesystem setup failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A single requested dataset finished without success.
    #[error("dataset '{0}' failed to download")]
    DatasetFailed(String),
}
