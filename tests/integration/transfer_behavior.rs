//! Transfer primitive behavior against a live local endpoint: streaming
//! write, `.part` staging, and error-status handling.

use dataset_downloader::fetcher::transfer::{part_path, Transfer};
use dataset_downloader::fetcher::FetcherError;
use reqwest::Client;
use url::Url;

use crate::integration::http_stub::start_stub;

#[tokio::test]
async fn successful_transfer_renames_part_into_place() {
    let base = start_stub(vec![("/data/x.bag", 200, b"bagbytes".to_vec())]);
    let transfer = Transfer::new(Client::new());
    let url = Url::parse(&format!("{base}/data/x.bag")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    // Parent directories are created on demand.
    let dest = dir.path().join("run1").join("x.bag");

    let written = transfer.fetch_to_path(&url, &dest).await.unwrap();

    assert_eq!(written, 8);
    assert_eq!(std::fs::read(&dest).unwrap(), b"bagbytes");
    assert!(!part_path(&dest).exists());
}

#[tokio::test]
async fn error_status_is_a_transfer_error_and_leaves_no_files() {
    let base = start_stub(vec![]);
    let transfer = Transfer::new(Client::new());
    let url = Url::parse(&format!("{base}/missing.bag")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("missing.bag");

    let err = transfer.fetch_to_path(&url, &dest).await.unwrap_err();
    assert!(matches!(err, FetcherError::Transfer(_)));
    assert!(!dest.exists());
    assert!(!part_path(&dest).exists());
}
