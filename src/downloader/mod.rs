//! Download orchestration: configuration, the per-dataset downloader trait,
//! shared run context, and outcome reporting.

pub mod config;
pub mod datasets;
pub mod summary;

pub use config::DownloadConfig;
pub use datasets::create_downloader;
pub use summary::{DatasetReport, DownloadOutcome, RunSummary};

use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use thiserror::Error;

use crate::fetcher::retry::RetryPolicy;
use crate::fetcher::transfer::Transfer;
use crate::fetcher::FetcherError;
use crate::registry::DatasetId;
use crate::shutdown::SharedShutdown;

/// Errors from running a dataset download.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// A fetch, parse, manifest, or transfer failure.
    #[error("fetch error: {0}")]
    Fetcher(#[from] FetcherError),

    /// The dataset is not runnable as configured.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shared state threaded through every downloader: one HTTP client, the run
/// configuration, and an optional cooperative-shutdown handle.
#[derive(Debug, Clone)]
pub struct DownloadContext {
    /// HTTP client shared by all requests in the run.
    pub client: Client,
    /// Run configuration.
    pub config: DownloadConfig,
    shutdown: Option<SharedShutdown>,
}

impl DownloadContext {
    /// Create a context with a fresh HTTP client.
    pub fn new(config: DownloadConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            shutdown: None,
        }
    }

    /// Attach a shutdown handle propagated into retry loops and crawlers.
    pub fn with_shutdown(mut self, shutdown: SharedShutdown) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Shutdown handle, if one is attached.
    pub fn shutdown(&self) -> Option<SharedShutdown> {
        self.shutdown.clone()
    }

    /// Output directory for one dataset: `<output_dir>/<dataset name>`.
    pub fn dataset_dir(&self, id: DatasetId) -> PathBuf {
        self.config.output_dir.join(id.name())
    }

    /// Retry policy built from the configuration, shutdown-aware when a
    /// handle is attached.
    pub fn retry_policy(&self) -> RetryPolicy {
        let policy = RetryPolicy::new(self.config.max_retries, self.config.backoff_base);
        match &self.shutdown {
            Some(shutdown) => policy.with_shutdown(shutdown.clone()),
            None => policy,
        }
    }

    /// Transfer primitive bound to the shared client.
    pub fn transfer(&self) -> Transfer {
        Transfer::new(self.client.clone())
    }
}

/// A dataset-specific download strategy.
///
/// Implementations return `Ok` with a report whose success flag reflects the
/// dataset's own verdict; `Err` is reserved for failures that prevent the
/// download from being attempted at all.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Registry name of the dataset this downloader handles.
    fn name(&self) -> &'static str;

    /// Run the download into the context's dataset directory.
    async fn download(&self, ctx: &DownloadContext) -> Result<DatasetReport, DownloadError>;
}
