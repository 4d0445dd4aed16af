//! Snapshot comparison: exact text equality between baseline and current.

use tracing::{debug, error, info, warn};

use super::SnapshotStore;
use crate::classify::Classifier;
use crate::error::Error;
use crate::progress::BatchProgress;
use crate::publish::{PublishOutcome, Publisher};

/// Outcome of comparing two snapshot sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonReport {
    /// Number of documents whose content differed.
    pub changed: usize,
    /// Changed documents whose verdict reached the queue.
    pub published: Vec<String>,
    /// Changed documents the classifier could not judge.
    pub unclassified: Vec<String>,
    /// Changed documents whose verdict could not be sent.
    pub publish_failed: Vec<String>,
    /// Baseline documents with no current snapshot.
    pub missing: Vec<String>,
    /// Documents whose snapshot files could not be read.
    pub unreadable: Vec<String>,
}

/// Compares every baseline snapshot with its current counterpart, in sorted
/// name order, and classifies and publishes each difference.
///
/// # Errors
///
/// Returns [`Error::Snapshot`] only if the baseline directory cannot be listed;
/// per-document problems are logged and recorded in the report.
pub async fn compare_snapshots(
    baseline: &SnapshotStore<'_>,
    current: &SnapshotStore<'_>,
    classifier: &Classifier<'_>,
    publisher: &Publisher<'_>,
) -> Result<ComparisonReport, Error> {
    let names = baseline.names()?;
    let mut report = ComparisonReport::default();
    let progress = BatchProgress::new("Comparing Files", names.len());

    for name in names {
        progress.start(&name);
        compare_one(&name, baseline, current, classifier, publisher, &mut report).await;
        progress.advance();
    }
    progress.finish();

    info!(
        changed = report.changed,
        published = report.published.len(),
        unclassified = report.unclassified.len(),
        publish_failed = report.publish_failed.len(),
        missing = report.missing.len(),
        unreadable = report.unreadable.len(),
        "Detected {} changed records",
        report.changed
    );
    Ok(report)
}

async fn compare_one(
    name: &str,
    baseline: &SnapshotStore<'_>,
    current: &SnapshotStore<'_>,
    classifier: &Classifier<'_>,
    publisher: &Publisher<'_>,
    report: &mut ComparisonReport,
) {
    if !current.contains(name) {
        warn!(document = name, "current snapshot does not exist, skipping comparison");
        report.missing.push(name.to_string());
        return;
    }

    let (original, latest) = match (baseline.load(name), current.load(name)) {
        (Ok(original), Ok(latest)) => (original, latest),
        (Err(e), _) | (_, Err(e)) => {
            error!(document = name, "Error reading snapshots: {e}");
            report.unreadable.push(name.to_string());
            return;
        }
    };

    if original == latest {
        debug!(document = name, "unchanged");
        return;
    }

    report.changed += 1;
    let classification = classifier.classify(name, &original, &latest).await;
    match publisher.publish(&classification).await {
        PublishOutcome::Published => report.published.push(name.to_string()),
        PublishOutcome::Failed => report.publish_failed.push(name.to_string()),
        PublishOutcome::Skipped => report.unclassified.push(name.to_string()),
    }
}
