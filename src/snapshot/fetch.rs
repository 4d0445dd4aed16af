//! Content fetching: one GET per document, text of `div.content` to disk.

use std::path::PathBuf;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, error, info};

use super::SnapshotStore;
use crate::agenda::DocumentRef;
use crate::context::ServiceContext;
use crate::error::FetchError;
use crate::progress::BatchProgress;

static CONTENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.content").expect("static selector is valid"));

/// Outcome of fetching a batch of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    /// Names whose snapshot was written.
    pub saved: Vec<String>,
    /// Names that were skipped, with the reason.
    pub failed: Vec<(String, String)>,
}

/// Plain text of the first `div.content` element, every descendant text node
/// concatenated verbatim.
#[must_use]
pub fn extract_content(markup: &str) -> Option<String> {
    let document = Html::parse_document(markup);
    document.select(&CONTENT).next().map(|element| element.text().collect())
}

/// Fetches one document and writes its snapshot.
///
/// # Errors
///
/// Returns a [`FetchError`] describing why the document could not be saved.
pub async fn fetch_document(
    ctx: &ServiceContext,
    reference: &DocumentRef,
    store: &SnapshotStore<'_>,
) -> Result<PathBuf, FetchError> {
    let locator = reference.locator.clone();
    let page = ctx
        .fetcher
        .get(&reference.locator)
        .await
        .map_err(|source| FetchError::Request { locator: locator.clone(), source })?;

    if !page.is_success() {
        return Err(FetchError::Status { locator, status: page.status });
    }

    let content =
        extract_content(&page.body).ok_or(FetchError::MissingContent { locator })?;

    store
        .save(&reference.name, &content)
        .map_err(|source| FetchError::Write { path: store.path_for(&reference.name), source })
}

/// Fetches every reference in order, writing snapshots into `store`.
///
/// Failures are logged and recorded per item; the batch always runs to the end.
pub async fn fetch_all(
    ctx: &ServiceContext,
    references: &[DocumentRef],
    store: &SnapshotStore<'_>,
) -> FetchReport {
    let mut report = FetchReport::default();
    let progress = BatchProgress::new("Processing Records", references.len());

    for reference in references {
        progress.start(&reference.name);
        match fetch_document(ctx, reference, store).await {
            Ok(path) => {
                debug!(document = %reference.name, path = %path.display(), "saved snapshot");
                report.saved.push(reference.name.clone());
            }
            Err(e) => {
                error!(document = %reference.name, locator = %reference.locator, "Failed to fetch or save content: {e}");
                report.failed.push((reference.name.clone(), e.to_string()));
            }
        }
        progress.advance();
    }
    progress.finish();

    info!(
        saved = report.saved.len(),
        failed = report.failed.len(),
        dir = %store.dir().display(),
        "fetched documents"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, StubFetcher};
    use super::*;

    fn page(content: &str) -> String {
        format!(
            "<html><body><nav>menu</nav><div class=\"content\">{content}</div>\
             <div class=\"content\">second</div></body></html>"
        )
    }

    #[test]
    fn extracts_first_container_text_verbatim() {
        let text = extract_content(&page("<h1>Title</h1>\n  <p>Body <em>text</em></p>")).unwrap();
        assert_eq!(text, "Title\n  Body text");
    }

    #[test]
    fn missing_container_yields_none() {
        assert!(extract_content("<div class=\"other\">x</div>").is_none());
    }

    #[tokio::test]
    async fn round_trip_preserves_non_ascii_text() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(StubFetcher::default().with("http://x/a", 200, &page("Grüße, 世界 — ✓")));
        let store = SnapshotStore::new(&ctx, dir.path());

        let reference = DocumentRef::new("http://x/a", "Doc A");
        fetch_document(&ctx, &reference, &store).await.unwrap();

        let written = std::fs::read_to_string(dir.path().join("Doc A.txt")).unwrap();
        assert_eq!(written, "Grüße, 世界 — ✓");
    }

    #[tokio::test]
    async fn batch_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(
            StubFetcher::default()
                .with("http://x/ok", 200, &page("fine"))
                .with("http://x/gone", 404, "not found")
                .with("http://x/bare", 200, "<p>no container</p>"),
        );
        let store = SnapshotStore::new(&ctx, &dir.path().join("temp"));

        let references = vec![
            DocumentRef::new("http://x/gone", "Gone"),
            DocumentRef::new("http://x/down", "Down"),
            DocumentRef::new("http://x/bare", "Bare"),
            DocumentRef::new("http://x/ok", "Ok"),
        ];
        let report = fetch_all(&ctx, &references, &store).await;

        assert_eq!(report.saved, vec!["Ok".to_string()]);
        let failed: Vec<&str> = report.failed.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(failed, vec!["Gone", "Down", "Bare"]);
        assert!(report.failed[0].1.contains("HTTP 404"));
        assert!(report.failed[2].1.contains("no content container"));
        assert_eq!(store.names().unwrap(), vec!["Ok".to_string()]);
    }

    #[tokio::test]
    async fn existing_snapshot_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Doc.txt"), "stale").unwrap();
        let ctx = context(StubFetcher::default().with("http://x/d", 200, &page("fresh")));
        let store = SnapshotStore::new(&ctx, dir.path());

        fetch_all(&ctx, &[DocumentRef::new("http://x/d", "Doc")], &store).await;

        assert_eq!(store.load("Doc").unwrap(), "fresh");
    }
}
