//! Post-download processing hook.
//!
//! Invoked after a single-dataset download when the user passes `--process`.
//! Currently an inventory pass only; conversion of raw recordings into
//! training-ready layouts plugs in here.

use std::path::Path;
use tracing::{info, warn};

/// Process a downloaded dataset in place.
pub fn process_dataset(name: &str, dir: &Path) -> std::io::Result<()> {
    if !dir.is_dir() {
        warn!(dataset = name, dir = %dir.display(), "Nothing to process: directory missing");
        return Ok(());
    }

    let items = std::fs::read_dir(dir)?.count();
    info!(dataset = name, dir = %dir.display(), items, "Processing dataset");
    info!(dataset = name, "No processing steps registered; leaving files as downloaded");
    Ok(())
}
