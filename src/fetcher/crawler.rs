//! Recursive directory-listing crawler.
//!
//! Walks an HTTP index page, discovers sub-folder entries, enumerates archive
//! files inside each folder, and drives the transfer primitive over the full
//! matrix of discovered paths, preserving the remote folder structure on
//! disk.
//!
//! Failure semantics: an unreachable root listing is fatal (no files can be
//! known); an unreachable folder listing skips that folder and the crawl
//! continues; a single file's retry exhaustion marks that file failed and the
//! crawl continues.

use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use url::Url;

use crate::downloader::summary::DownloadOutcome;
use crate::fetcher::listing::{archive_entries, fetch_listing, FolderTarget, ListingFilter};
use crate::fetcher::retry::RetryPolicy;
use crate::fetcher::transfer::Transfer;
use crate::fetcher::{FetcherResult, FileEntry};
use crate::shutdown::SharedShutdown;

/// Index crawler: `ListRoot -> {per folder: ListFolder -> {per matching
/// file: Transfer}}`.
pub struct IndexCrawler {
    client: Client,
    transfer: Transfer,
    retry: RetryPolicy,
    root_url: Url,
    filter: ListingFilter,
    archive_suffix: String,
    shutdown: Option<SharedShutdown>,
}

impl IndexCrawler {
    /// Create a crawler rooted at `root_url`, matching files by
    /// `archive_suffix`.
    pub fn new(client: Client, root_url: Url, archive_suffix: impl Into<String>) -> Self {
        let transfer = Transfer::new(client.clone());
        Self {
            client,
            transfer,
            retry: RetryPolicy::default(),
            root_url,
            filter: ListingFilter::default(),
            archive_suffix: archive_suffix.into(),
            shutdown: None,
        }
    }

    /// Override the retry policy applied to each file transfer.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Override the folder/navigation classification filter.
    pub fn with_filter(mut self, filter: ListingFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Attach a shutdown handle checked between file transfers.
    pub fn with_shutdown(mut self, shutdown: SharedShutdown) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Crawl the index and download every discovered archive file to
    /// `<output_dir>/<folder_name>/<file_name>`.
    ///
    /// Returns one [`DownloadOutcome`] per attempted file. Errors only when
    /// the root listing itself cannot be fetched.
    pub async fn crawl(&self, output_dir: &Path) -> FetcherResult<Vec<DownloadOutcome>> {
        let root_entries = fetch_listing(&self.client, &self.root_url).await?;
        let folders = self.filter.folder_targets(&self.root_url, &root_entries);

        if folders.is_empty() {
            info!(url = %self.root_url, "Root listing contains no folder links");
            return Ok(Vec::new());
        }

        info!(
            url = %self.root_url,
            folders = folders.len(),
            "Discovered folders in root listing"
        );

        let mut outcomes = Vec::new();
        for folder in &folders {
            if self.shutdown_requested() {
                info!("Shutdown requested - stopping crawl");
                break;
            }

            let files = match self.list_folder(folder, output_dir).await {
                Ok(files) => files,
                Err(e) => {
                    // One unreachable folder does not sink the crawl.
                    warn!(folder = %folder.name, error = %e, "Skipping folder listing");
                    continue;
                }
            };

            if files.is_empty() {
                info!(folder = %folder.name, "No archive files in folder; skipping");
                continue;
            }

            for entry in files {
                if self.shutdown_requested() {
                    info!("Shutdown requested - stopping crawl");
                    return Ok(outcomes);
                }
                outcomes.push(self.transfer_one(&entry).await);
            }
        }

        Ok(outcomes)
    }

    /// List one folder and resolve its matching archive files, destination
    /// included.
    async fn list_folder(
        &self,
        folder: &FolderTarget,
        output_dir: &Path,
    ) -> FetcherResult<Vec<FileEntry>> {
        let entries = fetch_listing(&self.client, &folder.url).await?;
        let mut files = Vec::new();
        for href in archive_entries(&entries, &self.archive_suffix) {
            match folder.url.join(&href) {
                Ok(url) => files.push(FileEntry {
                    dest: file_destination(output_dir, &folder.name, &href),
                    filename: href,
                    url,
                }),
                Err(e) => {
                    warn!(href = %href, error = %e, "Could not resolve file link");
                }
            }
        }
        Ok(files)
    }

    async fn transfer_one(&self, entry: &FileEntry) -> DownloadOutcome {
        match self
            .retry
            .run(|| self.transfer.fetch_to_path(&entry.url, &entry.dest))
            .await
        {
            Ok(_) => DownloadOutcome::Succeeded {
                filename: entry.filename.clone(),
                destination: entry.dest.clone(),
            },
            Err(e) => {
                warn!(
                    filename = %entry.filename,
                    max_retries = self.retry.max_retries(),
                    error = %e,
                    "Giving up on file after exhausting retries"
                );
                DownloadOutcome::Failed {
                    filename: entry.filename.clone(),
                    reason: e.to_string(),
                }
            }
        }
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown
            .as_ref()
            .map(|s| s.is_shutdown_requested())
            .unwrap_or(false)
    }
}

/// Destination path preserving the remote folder structure:
/// `<output_dir>/<folder_name>/<file_name>`.
pub fn file_destination(output_dir: &Path, folder: &str, filename: &str) -> PathBuf {
    output_dir.join(folder).join(filename)
}
