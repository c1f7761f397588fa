//! Download configuration constants and tunables.

use std::path::PathBuf;
use std::time::Duration;

/// Maximum number of download attempts per file.
/// 5 attempts with exponential backoff allows recovery from transient network
/// issues while avoiding infinite loops on persistent failures (total backoff
/// sleep at defaults: 15 seconds).
pub const MAX_RETRIES: u32 = 5;

/// Initial backoff delay in milliseconds.
/// 1 second is long enough for transient server hiccups to clear but short
/// enough to not overly delay recovery.
pub const INITIAL_BACKOFF_MS: u64 = 1000;

/// Maximum backoff delay in milliseconds.
/// 30 seconds caps exponential backoff to prevent excessive wait times. At
/// the default attempt count the cap never triggers (largest sleep is 8s).
pub const MAX_BACKOFF_MS: u64 = 30_000;

/// Default base directory for downloaded datasets.
pub const DEFAULT_OUTPUT_DIR: &str = "datasets";

/// Calculate exponential backoff delay for a 0-based failed attempt index.
pub fn calculate_backoff(base: Duration, attempt: u32) -> Duration {
    let base_ms = base.as_millis() as u64;
    let delay_ms = base_ms.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(delay_ms.min(MAX_BACKOFF_MS))
}

/// Runtime tunables for a download run. Constructed once by the CLI and
/// carried in [`crate::downloader::DownloadContext`]; nothing here is read
/// from process-wide mutable state.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Maximum download attempts per file.
    pub max_retries: u32,
    /// Base unit for exponential backoff between attempts.
    pub backoff_base: Duration,
    /// Base directory under which each dataset gets its own sub-directory.
    pub output_dir: PathBuf,
    /// Override for the wanted-files manifest location. `None` uses the
    /// per-source default from the registry.
    pub manifest_path: Option<PathBuf>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            backoff_base: Duration::from_millis(INITIAL_BACKOFF_MS),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            manifest_path: None,
        }
    }
}
