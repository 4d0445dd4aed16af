//! `agenda-watch init` command.

use tracing::info;

use crate::agenda::load_agenda;
use crate::cli::Paths;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::snapshot::fetch::{fetch_all, FetchReport};
use crate::snapshot::SnapshotStore;

/// Execute the `init` command.
///
/// Fetches every document listed in the agenda into the baseline snapshot set.
/// Both snapshot directories are created if missing.
///
/// # Errors
///
/// Returns an error if the agenda cannot be read or a snapshot directory
/// cannot be created. Individual document failures are only reported.
pub async fn run(ctx: &ServiceContext, paths: &Paths) -> Result<FetchReport, Error> {
    let baseline = SnapshotStore::new(ctx, &paths.original_dir);
    let current = SnapshotStore::new(ctx, &paths.temp_dir);
    baseline.ensure_exists()?;
    current.ensure_exists()?;

    let extraction = load_agenda(ctx, &paths.agenda)?;
    let report = fetch_all(ctx, &extraction.references, &baseline).await;
    info!(
        saved = report.saved.len(),
        failed = report.failed.len(),
        "Initialized baseline with {} of {} records",
        report.saved.len(),
        extraction.references.len()
    );
    Ok(report)
}
