//! Manifest-against-catalog matching and selective download.
//!
//! A catalog entry is selected iff its filename exactly equals a manifest
//! entry (case-sensitive, no normalization). Selected entries are routed to
//! a destination sub-directory by filename pattern and transferred through
//! the retry policy; manifest entries that never download successfully are
//! reported as "not found", which is a reported condition, not an error.

use reqwest::Client;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use crate::downloader::summary::{DatasetReport, DownloadOutcome};
use crate::fetcher::dataverse::{DatasetCatalog, DataverseClient};
use crate::fetcher::manifest::WantedManifest;
use crate::fetcher::retry::RetryPolicy;
use crate::fetcher::transfer::Transfer;
use crate::fetcher::{FetcherResult, FileEntry};
use crate::shutdown::SharedShutdown;

/// Sub-directory for files tagged as delivery recordings.
pub const DELIVERY_SUBDIR: &str = "delivery_mdp";

/// Sub-directory for everything else.
pub const DEFAULT_SUBDIR: &str = "random_mdps";

/// Route a filename to its destination sub-directory by inspecting it for
/// the delivery tag.
pub fn route_subdir(filename: &str) -> &'static str {
    if filename.contains("DELIVERY") {
        DELIVERY_SUBDIR
    } else {
        DEFAULT_SUBDIR
    }
}

/// A selected catalog entry with its routing decision applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Remote filename (equal to the matching manifest entry).
    pub filename: String,
    /// Numeric data-file identifier for the access endpoint.
    pub id: u64,
    /// Destination sub-directory under the dataset's output directory.
    pub subdir: &'static str,
}

/// Result of matching a manifest against a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPlan {
    /// Catalog entries selected for download, in catalog order.
    pub selected: Vec<PlannedFile>,
    /// Manifest entries absent from the catalog, in manifest order.
    pub not_found: Vec<String>,
}

/// Compute the manifest/catalog intersection and per-file routing.
///
/// `not_found` obeys the set-difference law: exactly the manifest entries
/// whose filename appears nowhere in the catalog.
pub fn match_catalog(manifest: &WantedManifest, catalog: &DatasetCatalog) -> MatchPlan {
    let selected: Vec<PlannedFile> = catalog
        .entries()
        .iter()
        .filter(|entry| manifest.contains(&entry.filename))
        .map(|entry| PlannedFile {
            filename: entry.filename.clone(),
            id: entry.id,
            subdir: route_subdir(&entry.filename),
        })
        .collect();

    let matched: HashSet<&str> = selected.iter().map(|f| f.filename.as_str()).collect();
    let not_found = manifest
        .entries()
        .iter()
        .filter(|name| !matched.contains(name.as_str()))
        .cloned()
        .collect();

    MatchPlan { selected, not_found }
}

/// Drives transfer + retry over the matched subset of a dataset catalog.
pub struct CatalogMatcher<'a> {
    dataverse: &'a DataverseClient,
    transfer: Transfer,
    retry: RetryPolicy,
    doi: &'a str,
    shutdown: Option<SharedShutdown>,
}

impl<'a> CatalogMatcher<'a> {
    /// Create a matcher bound to one dataset DOI on one Dataverse
    /// installation.
    pub fn new(client: Client, dataverse: &'a DataverseClient, doi: &'a str) -> Self {
        Self {
            dataverse,
            transfer: Transfer::new(client),
            retry: RetryPolicy::default(),
            doi,
            shutdown: None,
        }
    }

    /// Override the retry policy applied to each file transfer.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Attach a shutdown handle checked between file transfers.
    pub fn with_shutdown(mut self, shutdown: SharedShutdown) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Download the subset of the catalog named by `manifest` into
    /// `output_dir`, routing each file by [`route_subdir`].
    ///
    /// Fatal errors: unreachable catalog. Per-file retry exhaustion is a
    /// recorded failure and the batch continues. The report's not-found list
    /// is `manifest − succeeded`: entries missing from the catalog plus any
    /// matched file that never transferred.
    pub async fn run(
        &self,
        dataset_name: &str,
        manifest: &WantedManifest,
        output_dir: &Path,
    ) -> FetcherResult<DatasetReport> {
        info!(
            manifest_files = manifest.len(),
            doi = self.doi,
            "Looking up wanted files in dataset catalog"
        );

        let catalog = self.dataverse.get_dataset(self.doi).await?;
        let plan = match_catalog(manifest, &catalog);

        info!(
            matched = plan.selected.len(),
            missing = plan.not_found.len(),
            catalog_files = catalog.len(),
            "Catalog matched against manifest"
        );

        let mut report = DatasetReport::new(dataset_name);
        for planned in &plan.selected {
            if self
                .shutdown
                .as_ref()
                .map(|s| s.is_shutdown_requested())
                .unwrap_or(false)
            {
                info!("Shutdown requested - stopping catalog download");
                break;
            }

            let entry = self.plan_entry(planned, output_dir)?;
            info!(filename = %entry.filename, id = planned.id, "Downloading catalog file");

            match self
                .retry
                .run(|| self.transfer.fetch_to_path(&entry.url, &entry.dest))
                .await
            {
                Ok(_) => report.push(DownloadOutcome::Succeeded {
                    filename: entry.filename.clone(),
                    destination: entry.dest.clone(),
                }),
                Err(e) => {
                    warn!(
                        filename = %entry.filename,
                        max_retries = self.retry.max_retries(),
                        error = %e,
                        "Giving up on file after exhausting retries"
                    );
                    report.push(DownloadOutcome::Failed {
                        filename: entry.filename.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        // not_found = manifest − succeeded: catalog misses plus matched
        // files whose transfer exhausted retries.
        let succeeded: HashSet<&str> = report.succeeded_filenames().into_iter().collect();
        let not_found = manifest
            .entries()
            .iter()
            .filter(|name| !succeeded.contains(name.as_str()))
            .cloned()
            .collect();
        report.set_not_found(not_found);

        // Partial success is still success; only a run with zero downloaded
        // files fails.
        report.set_success(report.succeeded_count() > 0);
        Ok(report)
    }

    fn plan_entry(&self, planned: &PlannedFile, output_dir: &Path) -> FetcherResult<FileEntry> {
        Ok(FileEntry {
            url: self.dataverse.datafile_url(planned.id)?,
            dest: output_dir.join(planned.subdir).join(&planned.filename),
            filename: planned.filename.clone(),
        })
    }
}
