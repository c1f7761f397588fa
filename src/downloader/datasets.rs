//! Concrete downloaders for each registered dataset and the factory that
//! maps a [`DatasetId`] to its strategy.

use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

use crate::downloader::summary::{DatasetReport, DownloadOutcome};
use crate::downloader::{DownloadContext, DownloadError, Downloader};
use crate::fetcher::catalog::CatalogMatcher;
use crate::fetcher::crawler::IndexCrawler;
use crate::fetcher::listing::ListingFilter;
use crate::fetcher::dataverse::DataverseClient;
use crate::fetcher::manifest::WantedManifest;
use crate::registry::{
    CatalogSourceConfig, DatasetId, DirectSourceConfig, IndexSourceConfig, GO_STANFORD, HURON,
    RECON, SCAND, TARTAN,
};

/// Build the downloader for a dataset.
pub fn create_downloader(id: DatasetId) -> Box<dyn Downloader> {
    match id {
        DatasetId::Huron => Box::new(IndexDownloader::new(id, HURON)),
        DatasetId::Scand => Box::new(CatalogDownloader::new(id, SCAND)),
        DatasetId::Tartan => Box::new(DirectDownloader::new(id, TARTAN)),
        DatasetId::GoStanford => Box::new(DirectDownloader::new(id, GO_STANFORD)),
        DatasetId::Recon => Box::new(DirectDownloader::new(id, RECON)),
    }
}

/// Crawls an HTTP index page and mirrors its folder structure.
pub struct IndexDownloader {
    id: DatasetId,
    source: IndexSourceConfig,
}

impl IndexDownloader {
    /// Downloader for one index-crawl source.
    pub fn new(id: DatasetId, source: IndexSourceConfig) -> Self {
        Self { id, source }
    }
}

#[async_trait]
impl Downloader for IndexDownloader {
    fn name(&self) -> &'static str {
        self.id.name()
    }

    async fn download(&self, ctx: &DownloadContext) -> Result<DatasetReport, DownloadError> {
        let root_url = Url::parse(self.source.root_url)
            .map_err(|e| DownloadError::Config(format!("bad root URL: {e}")))?;

        let mut crawler = IndexCrawler::new(ctx.client.clone(), root_url, self.source.archive_suffix)
            .with_retry(ctx.retry_policy())
            .with_filter(ListingFilter::new(self.source.denylist.iter().copied()));
        if let Some(shutdown) = ctx.shutdown() {
            crawler = crawler.with_shutdown(shutdown);
        }

        let outcomes = crawler.crawl(&ctx.dataset_dir(self.id)).await?;

        let mut report = DatasetReport::new(self.id.name());
        for outcome in outcomes {
            report.push(outcome);
        }
        // A crawl that discovered nothing is still a successful crawl; one
        // that discovered files but downloaded none of them is not.
        report.set_success(report.outcomes().is_empty() || report.succeeded_count() > 0);
        report.log_summary();
        Ok(report)
    }
}

/// Downloads the manifest-selected subset of a Dataverse dataset.
pub struct CatalogDownloader {
    id: DatasetId,
    source: CatalogSourceConfig,
}

impl CatalogDownloader {
    /// Downloader for one catalog source.
    pub fn new(id: DatasetId, source: CatalogSourceConfig) -> Self {
        Self { id, source }
    }
}

#[async_trait]
impl Downloader for CatalogDownloader {
    fn name(&self) -> &'static str {
        self.id.name()
    }

    async fn download(&self, ctx: &DownloadContext) -> Result<DatasetReport, DownloadError> {
        // Manifest problems must surface before any network traffic.
        let manifest_path = ctx
            .config
            .manifest_path
            .clone()
            .unwrap_or_else(|| self.source.manifest_path.into());
        let manifest = WantedManifest::load(&manifest_path)?;
        info!(
            manifest = %manifest_path.display(),
            wanted = manifest.len(),
            "Loaded wanted-files manifest"
        );

        let base_url = Url::parse(self.source.base_url)
            .map_err(|e| DownloadError::Config(format!("bad base URL: {e}")))?;
        let dataverse = DataverseClient::new(ctx.client.clone(), base_url);

        let mut matcher = CatalogMatcher::new(ctx.client.clone(), &dataverse, self.source.doi)
            .with_retry(ctx.retry_policy());
        if let Some(shutdown) = ctx.shutdown() {
            matcher = matcher.with_shutdown(shutdown);
        }

        let report = matcher
            .run(self.id.name(), &manifest, &ctx.dataset_dir(self.id))
            .await?;
        report.log_summary();
        Ok(report)
    }
}

/// Downloads a fixed list of direct URLs.
pub struct DirectDownloader {
    id: DatasetId,
    source: DirectSourceConfig,
}

impl DirectDownloader {
    /// Downloader for one direct-URL source.
    pub fn new(id: DatasetId, source: DirectSourceConfig) -> Self {
        Self { id, source }
    }
}

#[async_trait]
impl Downloader for DirectDownloader {
    fn name(&self) -> &'static str {
        self.id.name()
    }

    async fn download(&self, ctx: &DownloadContext) -> Result<DatasetReport, DownloadError> {
        if self.source.urls.is_empty() {
            return Err(DownloadError::Config(format!(
                "no download URLs configured for dataset '{}'",
                self.id
            )));
        }

        let retry = ctx.retry_policy();
        let transfer = ctx.transfer();
        let output_dir = ctx.dataset_dir(self.id);

        let mut report = DatasetReport::new(self.id.name());
        for raw in self.source.urls {
            let url = Url::parse(raw)
                .map_err(|e| DownloadError::Config(format!("bad URL '{raw}': {e}")))?;
            let filename = filename_from_url(&url)
                .ok_or_else(|| DownloadError::Config(format!("URL '{raw}' has no filename")))?;
            let dest = output_dir.join(&filename);

            match retry.run(|| transfer.fetch_to_path(&url, &dest)).await {
                Ok(_) => report.push(DownloadOutcome::Succeeded {
                    filename,
                    destination: dest,
                }),
                Err(e) => {
                    warn!(filename = %filename, error = %e, "Direct download failed");
                    report.push(DownloadOutcome::Failed {
                        filename,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report.set_success(report.failed_count() == 0);
        report.log_summary();
        Ok(report)
    }
}

/// Last path segment of a URL, if it names a file.
fn filename_from_url(url: &Url) -> Option<String> {
    url.path_segments()?
        .next_back()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
