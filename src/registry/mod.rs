//! Dataset registry: the fixed set of supported datasets, their selection
//! syntax, and the per-dataset source configuration.

use thiserror::Error;

/// Errors from resolving a dataset selection.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The requested name matches no registered dataset.
    #[error("unknown dataset '{0}' (valid: all, huron, scand, tartan, go_stanford, recon)")]
    UnknownDataset(String),
}

/// Identifier of one supported dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetId {
    /// HTTP index crawl of the HuRoN social-navigation recordings.
    Huron,
    /// Dataverse catalog download of the SCAND recordings.
    Scand,
    /// Direct-URL download of the TartanDrive recordings.
    Tartan,
    /// Direct-URL download of the GoStanford recordings.
    GoStanford,
    /// Direct-URL download of the RECON recordings.
    Recon,
}

impl DatasetId {
    /// Every registered dataset, in run order.
    pub const ALL: [DatasetId; 5] = [
        DatasetId::Huron,
        DatasetId::Scand,
        DatasetId::Tartan,
        DatasetId::GoStanford,
        DatasetId::Recon,
    ];

    /// Registry name: the CLI argument and the output sub-directory.
    pub fn name(&self) -> &'static str {
        match self {
            DatasetId::Huron => "huron",
            DatasetId::Scand => "scand",
            DatasetId::Tartan => "tartan",
            DatasetId::GoStanford => "go_stanford",
            DatasetId::Recon => "recon",
        }
    }

    /// Parse a registry name, case-insensitively.
    pub fn parse(name: &str) -> Result<Self, RegistryError> {
        match name.to_lowercase().as_str() {
            "huron" => Ok(DatasetId::Huron),
            "scand" => Ok(DatasetId::Scand),
            "tartan" => Ok(DatasetId::Tartan),
            "go_stanford" => Ok(DatasetId::GoStanford),
            "recon" => Ok(DatasetId::Recon),
            other => Err(RegistryError::UnknownDataset(other.to_string())),
        }
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What the user asked to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSelection {
    /// Every registered dataset, in registry order.
    All,
    /// A single dataset.
    One(DatasetId),
}

impl DatasetSelection {
    /// Parse the CLI dataset argument; `"all"` is the run-everything
    /// sentinel.
    pub fn parse(name: &str) -> Result<Self, RegistryError> {
        if name.eq_ignore_ascii_case("all") {
            Ok(DatasetSelection::All)
        } else {
            DatasetId::parse(name).map(DatasetSelection::One)
        }
    }
}

/// Source configuration for an HTTP index crawl.
#[derive(Debug, Clone, Copy)]
pub struct IndexSourceConfig {
    /// Root index page listing per-run folders.
    pub root_url: &'static str,
    /// File suffix selecting archive entries inside each folder.
    pub archive_suffix: &'static str,
    /// Navigation hrefs that must never be treated as folders.
    pub denylist: &'static [&'static str],
}

/// Source configuration for a Dataverse catalog download.
#[derive(Debug, Clone, Copy)]
pub struct CatalogSourceConfig {
    /// Dataverse installation base URL.
    pub base_url: &'static str,
    /// Persistent identifier of the dataset.
    pub doi: &'static str,
    /// Default wanted-files manifest path, relative to the working
    /// directory.
    pub manifest_path: &'static str,
}

/// Source configuration for a fixed list of direct download URLs.
#[derive(Debug, Clone, Copy)]
pub struct DirectSourceConfig {
    /// Download URLs, one file each.
    pub urls: &'static [&'static str],
}

/// HuRoN index crawl source.
pub const HURON: IndexSourceConfig = IndexSourceConfig {
    root_url: "https://datasets.cs.utexas.edu/huron/",
    archive_suffix: ".bag",
    denylist: &["../", "./", "/"],
};

/// SCAND Dataverse source.
pub const SCAND: CatalogSourceConfig = CatalogSourceConfig {
    base_url: "https://dataverse.tdl.org/",
    doi: "doi:10.18738/T8/0PRYRH",
    manifest_path: "scand_bags.txt",
};

// Mirror URLs for these three are not yet published; an empty list makes the
// dataset report a configuration error instead of silently succeeding.

/// TartanDrive direct source.
pub const TARTAN: DirectSourceConfig = DirectSourceConfig { urls: &[] };

/// GoStanford direct source.
pub const GO_STANFORD: DirectSourceConfig = DirectSourceConfig { urls: &[] };

/// RECON direct source.
pub const RECON: DirectSourceConfig = DirectSourceConfig { urls: &[] };
