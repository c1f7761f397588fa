//! Retry timing behavior, driven through the public policy API on a paused
//! tokio clock.

use dataset_downloader::fetcher::retry::RetryPolicy;
use dataset_downloader::fetcher::{FetcherError, FetcherResult};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn transient_failures_recover_after_backoff() {
    let attempts = AtomicU32::new(0);
    let policy = RetryPolicy::new(5, Duration::from_secs(1));

    let started = tokio::time::Instant::now();
    let result = policy
        .run(|| {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 3 {
                    Err(FetcherError::Transfer(format!("transient failure {n}")))
                } else {
                    Ok("downloaded")
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), "downloaded");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    // Two failures cost 1s + 2s of backoff; success adds none.
    assert_eq!(started.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn single_attempt_policy_never_sleeps() {
    let policy = RetryPolicy::new(1, Duration::from_secs(3600));

    let started = tokio::time::Instant::now();
    let result: FetcherResult<()> = policy
        .run(|| async { Err(FetcherError::Transfer("down".to_string())) })
        .await;

    assert!(result.is_err());
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn exhaustion_returns_the_last_error() {
    let attempts = AtomicU32::new(0);
    let policy = RetryPolicy::new(3, Duration::from_millis(100));

    let result: FetcherResult<()> = policy
        .run(|| {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Err(FetcherError::Transfer(format!("failure {n}"))) }
        })
        .await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("failure 3"));
}
