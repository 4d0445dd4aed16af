//! Operator-facing progress bars for the fetch and compare loops.

use indicatif::{ProgressBar, ProgressStyle};

/// A progress bar over one batch of documents.
///
/// Draws to stderr and stays hidden when stderr is not a terminal.
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    /// Creates a bar for `total` items labelled with `desc` (e.g. "Processing Records").
    #[must_use]
    pub fn new(desc: &'static str, total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{prefix}: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_prefix(desc);
        Self { bar }
    }

    /// Shows which document is being handled.
    pub fn start(&self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    /// Marks one document as done.
    pub fn advance(&self) {
        self.bar.inc(1);
    }

    /// Removes the bar from the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Items completed so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}
