//! Download command execution.

use tracing::{error, info};

use crate::cli::{Cli, CliError};
use crate::downloader::{create_downloader, DownloadConfig, DownloadContext, RunSummary};
use crate::process::process_dataset;
use crate::registry::{DatasetId, DatasetSelection};
use crate::shutdown::SharedShutdown;

/// Run the download described by the parsed arguments.
///
/// A single-dataset run propagates failure so the process exits non-zero; an
/// "all" run reports per-dataset status in the summary table and succeeds as
/// a whole so one broken mirror does not mask the others' results.
pub async fn execute(cli: Cli, shutdown: Option<SharedShutdown>) -> Result<(), CliError> {
    let selection = DatasetSelection::parse(&cli.dataset)?;

    std::fs::create_dir_all(&cli.output_dir)?;

    let config = DownloadConfig {
        max_retries: cli.max_retries,
        output_dir: cli.output_dir.clone(),
        manifest_path: cli.manifest.clone(),
        ..DownloadConfig::default()
    };
    let mut ctx = DownloadContext::new(config);
    if let Some(shutdown) = shutdown {
        ctx = ctx.with_shutdown(shutdown);
    }

    match selection {
        DatasetSelection::One(id) => download_one(id, &ctx, cli.process).await,
        DatasetSelection::All => download_all(&ctx, cli.process).await,
    }
}

async fn download_one(id: DatasetId, ctx: &DownloadContext, process: bool) -> Result<(), CliError> {
    info!(dataset = %id, "Starting download");
    let report = create_downloader(id).download(ctx).await?;

    if !report.is_success() {
        return Err(CliError::DatasetFailed(id.name().to_string()));
    }

    if process {
        process_dataset(id.name(), &ctx.dataset_dir(id))?;
    }
    Ok(())
}

async fn download_all(ctx: &DownloadContext, process: bool) -> Result<(), CliError> {
    let mut summary = RunSummary::new();

    for id in DatasetId::ALL {
        info!(dataset = %id, "Starting download");
        let success = match create_downloader(id).download(ctx).await {
            Ok(report) => report.is_success(),
            Err(e) => {
                error!(dataset = %id, error = %e, "Dataset download failed");
                false
            }
        };
        if success && process {
            process_dataset(id.name(), &ctx.dataset_dir(id))?;
        }
        summary.record(id.name(), success);
    }

    summary.print();
    Ok(())
}
