//! `agenda-watch compare` command.

use crate::agenda::load_agenda;
use crate::classify::Classifier;
use crate::cli::Paths;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::publish::Publisher;
use crate::snapshot::compare::{compare_snapshots, ComparisonReport};
use crate::snapshot::fetch::fetch_all;
use crate::snapshot::SnapshotStore;

/// Execute the `compare` command.
///
/// Fetches every agenda document into the current snapshot set, then compares
/// it with the baseline, classifying with deployment `model` and publishing
/// each verdict.
///
/// # Errors
///
/// Returns an error if the agenda cannot be read or a snapshot directory
/// cannot be created or listed. Individual document failures are only reported.
pub async fn run(ctx: &ServiceContext, paths: &Paths, model: &str) -> Result<ComparisonReport, Error> {
    let baseline = SnapshotStore::new(ctx, &paths.original_dir);
    let current = SnapshotStore::new(ctx, &paths.temp_dir);
    baseline.ensure_exists()?;
    current.ensure_exists()?;

    let extraction = load_agenda(ctx, &paths.agenda)?;
    fetch_all(ctx, &extraction.references, &current).await;

    let classifier = Classifier::new(ctx.llm.as_ref(), model);
    let publisher = Publisher::new(ctx.queue.as_ref());
    compare_snapshots(&baseline, &current, &classifier, &publisher).await
}
