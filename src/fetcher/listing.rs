//! Directory-listing page parsing and folder/file classification.
//!
//! An index page is plain HTML with anchor tags; the `href` attribute is used
//! exclusively for matching and URL resolution (link text and href may
//! differ). Anchors without an `href` are ignored. A page with no usable
//! anchors is treated as "zero items found", not an error.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::warn;
use url::Url;

use crate::fetcher::{FetcherError, FetcherResult};

// Anchors with an href attribute only; scraper guarantees the attribute is
// present for every match.
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector is valid"));

/// One anchor entry parsed from an index page. Ephemeral: constructed
/// per-request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Anchor text, trimmed. Informational only.
    pub name: String,
    /// The href attribute, used for all matching and resolution.
    pub href: String,
}

/// A discovered sub-folder: display name plus fully resolved URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderTarget {
    /// Folder name without the trailing separator.
    pub name: String,
    /// Absolute URL of the folder's own listing page.
    pub url: Url,
}

/// Extract all anchor entries from a listing page.
pub fn parse_listing(html: &str) -> Vec<ListingEntry> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            Some(ListingEntry {
                name: anchor.text().collect::<String>().trim().to_string(),
                href: href.to_string(),
            })
        })
        .collect()
}

/// Classifies listing anchors as folders or navigation artifacts.
///
/// Folder detection on arbitrary index pages is heuristic, so the denylist is
/// configurable rather than hard-coded; anchors that look like folders but
/// are excluded get flagged for manual review instead of silently dropped.
#[derive(Debug, Clone)]
pub struct ListingFilter {
    denylist: Vec<String>,
}

impl ListingFilter {
    /// Filter with an explicit denylist of known non-folder anchors.
    pub fn new<I, S>(denylist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            denylist: denylist.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether an href names a sub-folder of the current listing.
    pub fn is_folder(&self, href: &str) -> bool {
        href.ends_with('/')
            && !self.denylist.iter().any(|d| d == href)
            && !href.starts_with('?')
            && !href.starts_with('/')
            && !href.contains("://")
    }

    /// Retain folder entries and resolve each against `root`.
    ///
    /// Anchors with a trailing separator that the heuristic rejects are
    /// logged at warn level so misclassifications surface in the output.
    pub fn folder_targets(&self, root: &Url, entries: &[ListingEntry]) -> Vec<FolderTarget> {
        let mut targets = Vec::new();
        for entry in entries {
            if self.is_folder(&entry.href) {
                match root.join(&entry.href) {
                    Ok(url) => targets.push(FolderTarget {
                        name: entry.href.trim_end_matches('/').to_string(),
                        url,
                    }),
                    Err(e) => {
                        warn!(href = %entry.href, error = %e, "Could not resolve folder link");
                    }
                }
            } else if entry.href.ends_with('/') && !self.denylist.iter().any(|d| d == &entry.href) {
                warn!(
                    href = %entry.href,
                    "Anchor looks like a folder but was excluded; review the listing filter"
                );
            }
        }
        targets
    }
}

impl Default for ListingFilter {
    /// Known parent-directory and navigation artifacts on common index pages.
    fn default() -> Self {
        Self::new(["../", "./", "/"])
    }
}

/// Retain file entries whose href ends with `suffix`.
pub fn archive_entries(entries: &[ListingEntry], suffix: &str) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.href.ends_with(suffix))
        .map(|e| e.href.clone())
        .collect()
}

/// Fetch one listing page and parse its anchors. An unreachable page is a
/// [`FetcherError::Fetch`]; the caller decides whether that is fatal.
pub async fn fetch_listing(client: &reqwest::Client, url: &Url) -> FetcherResult<Vec<ListingEntry>> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| FetcherError::Fetch(format!("listing {url}: {e}")))?
        .error_for_status()
        .map_err(|e| FetcherError::Fetch(format!("listing {url}: {e}")))?;

    let body = response
        .text()
        .await
        .map_err(|e| FetcherError::Fetch(format!("listing {url}: {e}")))?;

    Ok(parse_listing(&body))
}
