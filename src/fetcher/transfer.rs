//! Streaming single-file transfer.
//!
//! Streams a remote resource to a local path in bounded-size chunks so memory
//! use stays flat regardless of file size. The body is written to a `.part`
//! sibling and renamed into place on success; a failed transfer never leaves
//! a truncated file under the final name.

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use crate::fetcher::{FetcherError, FetcherResult};

/// Transfer primitive wrapping a shared HTTP client.
#[derive(Debug, Clone)]
pub struct Transfer {
    client: Client,
}

impl Transfer {
    /// Create a transfer primitive over a shared client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Stream `url` to `dest`, creating missing parent directories.
    ///
    /// Returns the number of bytes written. Network errors, non-success HTTP
    /// statuses, and filesystem write errors all surface as
    /// [`FetcherError::Transfer`]; the caller decides whether to retry.
    pub async fn fetch_to_path(&self, url: &Url, dest: &Path) -> FetcherResult<u64> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FetcherError::Transfer(format!("create {}: {e}", parent.display())))?;
        }

        debug!(url = %url, dest = %dest.display(), "Starting transfer");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetcherError::Transfer(format!("request {url}: {e}")))?
            .error_for_status()
            .map_err(|e| FetcherError::Transfer(format!("request {url}: {e}")))?;

        let total = response.content_length();
        let progress = transfer_progress(total, dest);

        // Stage into a .part sibling so an interrupted transfer never leaves
        // a truncated file under the final name.
        let part = part_path(dest);
        let written = match self.stream_body(response, &part, &progress).await {
            Ok(written) => written,
            Err(e) => {
                progress.finish_and_clear();
                let _ = tokio::fs::remove_file(&part).await;
                return Err(e);
            }
        };

        tokio::fs::rename(&part, dest)
            .await
            .map_err(|e| FetcherError::Transfer(format!("rename to {}: {e}", dest.display())))?;

        progress.finish_and_clear();
        info!(bytes = written, dest = %dest.display(), "Downloaded");
        Ok(written)
    }

    async fn stream_body(
        &self,
        response: reqwest::Response,
        part: &Path,
        progress: &ProgressBar,
    ) -> FetcherResult<u64> {
        let mut file = tokio::fs::File::create(part)
            .await
            .map_err(|e| FetcherError::Transfer(format!("create {}: {e}", part.display())))?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| FetcherError::Transfer(format!("read body: {e}")))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| FetcherError::Transfer(format!("write {}: {e}", part.display())))?;
            written += chunk.len() as u64;
            progress.inc(chunk.len() as u64);
        }

        file.flush()
            .await
            .map_err(|e| FetcherError::Transfer(format!("flush {}: {e}", part.display())))?;
        Ok(written)
    }
}

/// Staging path for an in-flight transfer: `<filename>.part` in the same
/// directory as the destination.
pub fn part_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    dest.with_file_name(format!("{name}.part"))
}

/// Byte-styled bar when the total size is known, counter spinner otherwise.
fn transfer_progress(total: Option<u64>, dest: &Path) -> ProgressBar {
    let message = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let pb = match total {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
                    .expect("hardcoded template is valid")
                    .progress_chars("#>-"),
            );
            pb
        }
        None => {
            // No content-length: progress degrades to a byte counter.
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {bytes} ({bytes_per_sec}) {msg}")
                    .expect("hardcoded template is valid"),
            );
            pb
        }
    };
    pb.set_message(message);
    pb
}
