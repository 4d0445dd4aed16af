//! Replaying adapter for the `PageFetcher` port.

use super::{next_output, replay_result, SharedReplayer};
use crate::ports::{FetchFuture, FetchedPage, PageFetcher};

/// Serves recorded pages from a cassette, ignoring the requested URL.
pub struct ReplayingFetcher {
    replayer: SharedReplayer,
}

impl ReplayingFetcher {
    /// Creates a replaying fetcher backed by the given replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }
}

impl PageFetcher for ReplayingFetcher {
    fn get(&self, _url: &str) -> FetchFuture<'_> {
        let output = next_output(&self.replayer, "fetch", "get");
        Box::pin(async move { replay_result::<FetchedPage>(output, "fetch::get") })
    }
}
