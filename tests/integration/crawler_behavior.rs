//! Crawler failure semantics against a live local index: fatal root, skipped
//! folders, and the dataset-level verdict when downloads fail.

use dataset_downloader::downloader::{
    DownloadConfig, DownloadContext, DownloadOutcome, Downloader,
};
use dataset_downloader::downloader::datasets::IndexDownloader;
use dataset_downloader::fetcher::crawler::IndexCrawler;
use dataset_downloader::fetcher::retry::RetryPolicy;
use dataset_downloader::fetcher::FetcherError;
use dataset_downloader::registry::{DatasetId, IndexSourceConfig};
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::integration::http_stub::start_stub;

fn quick_retry() -> RetryPolicy {
    RetryPolicy::new(1, Duration::from_millis(1))
}

#[tokio::test]
async fn unreachable_root_listing_is_fatal() {
    let base = start_stub(vec![]);
    let root = Url::parse(&format!("{base}/root/")).unwrap();
    let crawler = IndexCrawler::new(Client::new(), root, ".bag").with_retry(quick_retry());

    let dir = tempfile::tempdir().unwrap();
    let err = crawler.crawl(dir.path()).await.unwrap_err();
    assert!(matches!(err, FetcherError::Fetch(_)));
}

#[tokio::test]
async fn unreachable_folder_is_skipped_and_crawl_continues() {
    let base = start_stub(vec![
        (
            "/root/",
            200,
            br#"<a href="../">up</a><a href="good/">good</a><a href="bad/">bad</a>"#.to_vec(),
        ),
        ("/root/good/", 200, br#"<a href="x.bag">x.bag</a>"#.to_vec()),
        ("/root/good/x.bag", 200, b"payload".to_vec()),
        // "/root/bad/" has no route: its listing fetch fails with a 404.
    ]);
    let root = Url::parse(&format!("{base}/root/")).unwrap();
    let crawler = IndexCrawler::new(Client::new(), root, ".bag").with_retry(quick_retry());

    let dir = tempfile::tempdir().unwrap();
    let outcomes = crawler.crawl(dir.path()).await.unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        &outcomes[0],
        DownloadOutcome::Succeeded { filename, .. } if filename == "x.bag"
    ));
    assert_eq!(
        std::fs::read(dir.path().join("good").join("x.bag")).unwrap(),
        b"payload"
    );
}

fn index_ctx(base_dir: &std::path::Path) -> DownloadContext {
    DownloadContext::new(DownloadConfig {
        max_retries: 1,
        backoff_base: Duration::from_millis(1),
        output_dir: base_dir.to_path_buf(),
        manifest_path: None,
    })
}

fn index_source(base: &str) -> IndexSourceConfig {
    IndexSourceConfig {
        root_url: Box::leak(format!("{base}/root/").into_boxed_str()),
        archive_suffix: ".bag",
        denylist: &["../", "./", "/"],
    }
}

#[tokio::test]
async fn index_dataset_fails_when_no_discovered_file_downloads() {
    let base = start_stub(vec![
        ("/root/", 200, br#"<a href="run1/">run1</a>"#.to_vec()),
        ("/root/run1/", 200, br#"<a href="x.bag">x.bag</a>"#.to_vec()),
        // "x.bag" itself 404s, so the only discovered file fails.
    ]);

    let dir = tempfile::tempdir().unwrap();
    let downloader = IndexDownloader::new(DatasetId::Huron, index_source(&base));
    let report = downloader.download(&index_ctx(dir.path())).await.unwrap();

    assert!(!report.is_success());
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.succeeded_count(), 0);
}

#[tokio::test]
async fn index_dataset_with_empty_root_listing_still_succeeds() {
    let base = start_stub(vec![("/root/", 200, b"<html></html>".to_vec())]);

    let dir = tempfile::tempdir().unwrap();
    let downloader = IndexDownloader::new(DatasetId::Huron, index_source(&base));
    let report = downloader.download(&index_ctx(dir.path())).await.unwrap();

    assert!(report.is_success());
    assert!(report.outcomes().is_empty());
}
