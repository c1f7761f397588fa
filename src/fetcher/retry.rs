//! Bounded retry with exponential backoff.
//!
//! Wraps a fallible async operation so a batch of many files can continue
//! past one bad file: exhaustion returns the last error to the caller, which
//! records it as a per-file outcome rather than aborting the run.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::downloader::config::{calculate_backoff, INITIAL_BACKOFF_MS, MAX_RETRIES};
use crate::fetcher::{FetcherError, FetcherResult};
use crate::shutdown::SharedShutdown;

/// Retry policy: attempt an operation up to `max_retries` times, sleeping
/// `backoff_base * 2^attempt` between failures. No sleep after the final
/// attempt. A successful attempt short-circuits the rest.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff_base: Duration,
    shutdown: Option<SharedShutdown>,
}

impl RetryPolicy {
    /// Create a policy with an explicit attempt bound and backoff base.
    pub fn new(max_retries: u32, backoff_base: Duration) -> Self {
        Self {
            max_retries,
            backoff_base,
            shutdown: None,
        }
    }

    /// Attach a shutdown handle; backoff sleeps race against it so a Ctrl+C
    /// does not wait out the remaining delay.
    pub fn with_shutdown(mut self, shutdown: SharedShutdown) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Maximum number of attempts this policy will make.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown
            .as_ref()
            .map(|s| s.is_shutdown_requested())
            .unwrap_or(false)
    }

    /// Run `op` under this policy. Returns the first success, or the last
    /// error once all attempts are exhausted.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> FetcherResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = FetcherResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..self.max_retries {
            if self.shutdown_requested() {
                return Err(last_error.unwrap_or_else(|| {
                    FetcherError::Transfer("shutdown requested".to_string())
                }));
            }

            match op().await {
                Ok(value) => {
                    if attempt > 0 {
                        info!(
                            attempt = attempt + 1,
                            max_retries = self.max_retries,
                            "Retry attempt succeeded"
                        );
                    }
                    return Ok(value);
                }
                Err(e) => {
                    warn!(
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        error = %e,
                        "Attempt failed"
                    );
                    last_error = Some(e);
                }
            }

            // No sleep after the final attempt.
            if attempt + 1 < self.max_retries {
                let backoff = calculate_backoff(self.backoff_base, attempt);
                debug!(backoff_ms = backoff.as_millis() as u64, "Backing off before retry");
                if let Some(shutdown) = &self.shutdown {
                    tokio::select! {
                        _ = tokio::time::sleep(backoff) => {}
                        _ = shutdown.wait_for_shutdown() => {
                            return Err(last_error.unwrap_or_else(|| {
                                FetcherError::Transfer("shutdown requested".to_string())
                            }));
                        }
                    }
                } else {
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| FetcherError::Transfer("no attempts were made".to_string())))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_RETRIES, Duration::from_millis(INITIAL_BACKOFF_MS))
    }
}
