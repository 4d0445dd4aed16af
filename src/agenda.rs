//! Agenda parsing: turns the index page into document references.

use std::path::Path;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::context::ServiceContext;
use crate::error::Error;

static TREE_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.tree-item").expect("static selector is valid"));

/// Characters replaced by `_` when deriving a file name from display text.
const ILLEGAL_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '\n'];

/// A monitored document: where to fetch it and what to call its snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Link target from the agenda.
    pub locator: String,
    /// File-safe name; the snapshot file is `<name>.txt`.
    pub name: String,
}

impl DocumentRef {
    /// Builds a reference from raw display text, sanitizing the name.
    pub fn new(locator: impl Into<String>, display_text: &str) -> Self {
        Self { locator: locator.into(), name: sanitize_name(display_text.trim()) }
    }
}

/// Replaces every character that is illegal in file names with `_`.
///
/// Idempotent: the replacement character is itself legal.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    name.chars().map(|c| if ILLEGAL_NAME_CHARS.contains(&c) { '_' } else { c }).collect()
}

/// Result of parsing an agenda.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// References in document order.
    pub references: Vec<DocumentRef>,
    /// Tree-item anchors skipped for lacking a link target.
    pub skipped: usize,
}

/// Extracts one reference per `a.tree-item` anchor that has a non-empty `href`.
///
/// Anchors without a link target are skipped with a warning. Names and
/// locators are not deduplicated.
#[must_use]
pub fn extract_references(markup: &str) -> Extraction {
    let document = Html::parse_document(markup);
    let mut extraction = Extraction::default();

    for anchor in document.select(&TREE_ITEM) {
        let text: String = anchor.text().collect();
        match anchor.value().attr("href").map(str::trim).filter(|href| !href.is_empty()) {
            Some(href) => extraction.references.push(DocumentRef::new(href, &text)),
            None => {
                warn!(text = text.trim(), "found tree-item anchor without href");
                extraction.skipped += 1;
            }
        }
    }

    extraction
}

/// Reads the agenda file and extracts its references.
///
/// # Errors
///
/// Returns [`Error::Agenda`] if the file cannot be read.
pub fn load_agenda(ctx: &ServiceContext, path: &Path) -> Result<Extraction, Error> {
    let markup = ctx
        .fs
        .read_to_string(path)
        .map_err(|source| Error::Agenda { path: path.to_path_buf(), source })?;
    let extraction = extract_references(&markup);
    info!(
        records = extraction.references.len(),
        skipped = extraction.skipped,
        "Extracted {} records from agenda",
        extraction.references.len()
    );
    Ok(extraction)
}
