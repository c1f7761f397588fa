//! Per-file outcomes, per-dataset reports, and the end-of-run summary table.

use std::path::PathBuf;
use tracing::{info, warn};

/// Terminal state of one attempted file transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file landed at its destination.
    Succeeded {
        /// Remote filename.
        filename: String,
        /// Final on-disk path.
        destination: PathBuf,
    },
    /// Every retry attempt failed.
    Failed {
        /// Remote filename.
        filename: String,
        /// Rendered error from the last attempt.
        reason: String,
    },
}

impl DownloadOutcome {
    /// Remote filename regardless of outcome.
    pub fn filename(&self) -> &str {
        match self {
            Self::Succeeded { filename, .. } | Self::Failed { filename, .. } => filename,
        }
    }

    /// Whether the transfer succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Aggregated result of one dataset download.
#[derive(Debug, Clone)]
pub struct DatasetReport {
    dataset: String,
    outcomes: Vec<DownloadOutcome>,
    not_found: Vec<String>,
    success: bool,
}

impl DatasetReport {
    /// Empty report for `dataset`. Starts successful; the runner downgrades
    /// it based on outcomes.
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            outcomes: Vec::new(),
            not_found: Vec::new(),
            success: true,
        }
    }

    /// Dataset name this report covers.
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Record one file outcome.
    pub fn push(&mut self, outcome: DownloadOutcome) {
        self.outcomes.push(outcome);
    }

    /// All recorded outcomes, in attempt order.
    pub fn outcomes(&self) -> &[DownloadOutcome] {
        &self.outcomes
    }

    /// Replace the list of wanted files that were never downloaded.
    pub fn set_not_found(&mut self, not_found: Vec<String>) {
        self.not_found = not_found;
    }

    /// Wanted files that were never downloaded.
    pub fn not_found(&self) -> &[String] {
        &self.not_found
    }

    /// Set the overall verdict.
    pub fn set_success(&mut self, success: bool) {
        self.success = success;
    }

    /// Overall verdict for this dataset.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Number of files that landed on disk.
    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of files that exhausted their retries.
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.succeeded_count()
    }

    /// Filenames of successful transfers, in attempt order.
    pub fn succeeded_filenames(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.is_success())
            .map(|o| o.filename())
            .collect()
    }

    /// Log the per-dataset tallies, one warn line per missing file.
    pub fn log_summary(&self) {
        info!(
            dataset = %self.dataset,
            succeeded = self.succeeded_count(),
            failed = self.failed_count(),
            "Dataset download finished"
        );
        for outcome in &self.outcomes {
            if let DownloadOutcome::Failed { filename, reason } = outcome {
                warn!(dataset = %self.dataset, filename = %filename, reason = %reason, "File failed");
            }
        }
        if !self.not_found.is_empty() {
            warn!(
                dataset = %self.dataset,
                count = self.not_found.len(),
                "Some wanted files were not downloaded"
            );
            for filename in &self.not_found {
                warn!(dataset = %self.dataset, filename = %filename, "Not downloaded");
            }
        }
    }
}

/// End-of-run tally across datasets, printed as a fixed-width table.
#[derive(Debug, Default)]
pub struct RunSummary {
    results: Vec<(String, bool)>,
}

impl RunSummary {
    /// Empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one dataset verdict, in run order.
    pub fn record(&mut self, dataset: impl Into<String>, success: bool) {
        self.results.push((dataset.into(), success));
    }

    /// Whether every recorded dataset succeeded. True for an empty summary.
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|(_, ok)| *ok)
    }

    /// Recorded verdicts, in run order.
    pub fn results(&self) -> &[(String, bool)] {
        &self.results
    }

    /// Print the summary table to stdout.
    ///
    /// Deliberately `println!` rather than tracing: the table is the tool's
    /// primary output and must survive `RUST_LOG=off`.
    pub fn print(&self) {
        println!("\n{}", "=".repeat(50));
        println!("Download Summary");
        println!("{}", "=".repeat(50));
        for (dataset, success) in &self.results {
            let status = if *success { "[OK]" } else { "[FAIL]" };
            println!("{status:<8} {dataset}");
        }
        println!("{}", "=".repeat(50));
    }
}
