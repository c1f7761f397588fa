//! Dataverse metadata API client.
//!
//! Two calls only: fetch a dataset's file catalog by persistent identifier
//! (DOI), and build the per-file data-access URL keyed by the numeric file
//! id. The client is constructed once and passed by reference into the
//! catalog matcher; no module-level session state.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::fetcher::{FetcherError, FetcherResult};

/// One file in a dataset's remote catalog: filename plus the opaque numeric
/// identifier the data-access endpoint is keyed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Remote filename.
    pub filename: String,
    /// Numeric data-file identifier.
    pub id: u64,
}

/// The remote service's full enumeration of files belonging to one dataset.
/// Used only for lookup; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetCatalog {
    entries: Vec<CatalogEntry>,
}

impl DatasetCatalog {
    /// Build a catalog from entries (exposed for tests and callers that
    /// already hold a file list).
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Entries in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of files in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no files.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Client for a Dataverse-style metadata API.
#[derive(Debug, Clone)]
pub struct DataverseClient {
    client: Client,
    base_url: Url,
}

impl DataverseClient {
    /// Create a client for the installation at `base_url`.
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Fetch the file catalog of the dataset identified by `doi`.
    ///
    /// An unreachable or access-restricted dataset is a fatal
    /// [`FetcherError::Fetch`]: with no catalog there is nothing to match
    /// against, so the caller must stop rather than download blindly.
    pub async fn get_dataset(&self, doi: &str) -> FetcherResult<DatasetCatalog> {
        let mut url = self
            .base_url
            .join("api/datasets/:persistentId/")
            .map_err(|e| FetcherError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("persistentId", doi);

        debug!(url = %url, "Fetching dataset catalog");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetcherError::Fetch(format!("dataset {doi}: {e}")))?
            .error_for_status()
            .map_err(|e| {
                FetcherError::Fetch(format!(
                    "dataset {doi}: {e} (the dataset may require an API token)"
                ))
            })?;

        let body: DatasetResponse = response
            .json()
            .await
            .map_err(|e| FetcherError::Parse(format!("dataset {doi}: {e}")))?;

        Ok(body.into_catalog())
    }

    /// Data-access download URL for a catalog entry:
    /// `<base_url>/api/access/datafile/<id>`.
    pub fn datafile_url(&self, id: u64) -> FetcherResult<Url> {
        self.base_url
            .join(&format!("api/access/datafile/{id}"))
            .map_err(|e| FetcherError::InvalidUrl(e.to_string()))
    }
}

// Wire format: {"data": {"latestVersion": {"files": [{"dataFile":
// {"id": N, "filename": "..."}}]}}; unknown fields ignored.
#[derive(Debug, Deserialize)]
struct DatasetResponse {
    data: DatasetData,
}

#[derive(Debug, Deserialize)]
struct DatasetData {
    #[serde(rename = "latestVersion")]
    latest_version: DatasetVersion,
}

#[derive(Debug, Deserialize)]
struct DatasetVersion {
    files: Vec<FileRecord>,
}

#[derive(Debug, Deserialize)]
struct FileRecord {
    #[serde(rename = "dataFile")]
    data_file: DataFileRecord,
}

#[derive(Debug, Deserialize)]
struct DataFileRecord {
    id: u64,
    filename: String,
}

impl DatasetResponse {
    fn into_catalog(self) -> DatasetCatalog {
        DatasetCatalog::new(
            self.data
                .latest_version
                .files
                .into_iter()
                .map(|f| CatalogEntry {
                    filename: f.data_file.filename,
                    id: f.data_file.id,
                })
                .collect(),
        )
    }
}
