//! Wanted-files manifest.
//!
//! A plain-text file naming the archive files a catalog-backed download must
//! attempt, one per line. Lines may carry bullet decoration (`*`, `-`, `•`)
//! copied from notes or READMEs; anything that does not end with the archive
//! suffix is ignored. Order is preserved and duplicates collapse to their
//! first occurrence.

use std::collections::HashSet;
use std::path::Path;

use crate::fetcher::{FetcherError, FetcherResult, ARCHIVE_SUFFIX};

/// Ordered, deduplicated set of target filenames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WantedManifest {
    entries: Vec<String>,
}

impl WantedManifest {
    /// Read a manifest from disk. Missing file or no usable entries is a
    /// fatal [`FetcherError::Manifest`], raised before any network call.
    pub fn load(path: &Path) -> FetcherResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            FetcherError::Manifest(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&text).map_err(|_| {
            FetcherError::Manifest(format!(
                "{} contains no {ARCHIVE_SUFFIX} filenames",
                path.display()
            ))
        })
    }

    /// Parse manifest text. Strips whitespace and leading bullet characters
    /// from each line, keeps entries ending with the archive suffix.
    pub fn parse(text: &str) -> FetcherResult<Self> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for line in text.lines() {
            let cleaned = line.trim().trim_start_matches(['*', '-', '•']).trim();
            if cleaned.is_empty() || !cleaned.ends_with(ARCHIVE_SUFFIX) {
                continue;
            }
            if seen.insert(cleaned.to_string()) {
                entries.push(cleaned.to_string());
            }
        }

        if entries.is_empty() {
            return Err(FetcherError::Manifest(
                "manifest contains no archive filenames".to_string(),
            ));
        }

        Ok(Self { entries })
    }

    /// Entries in manifest order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of wanted files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest is empty. Never true for a loaded manifest.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, filename: &str) -> bool {
        self.entries.iter().any(|e| e == filename)
    }
}
