//! Recording adapter for the `PageFetcher` port.

use serde::Serialize;

use super::{record_result, SharedRecorder};
use crate::ports::{FetchFuture, PageFetcher};

/// Records fetches while delegating to an inner implementation.
pub struct RecordingFetcher {
    inner: Box<dyn PageFetcher>,
    recorder: SharedRecorder,
}

impl RecordingFetcher {
    /// Creates a recording fetcher wrapping the given implementation.
    pub fn new(inner: Box<dyn PageFetcher>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct GetInput<'a> {
    url: &'a str,
}

impl PageFetcher for RecordingFetcher {
    fn get(&self, url: &str) -> FetchFuture<'_> {
        let url = url.to_string();
        Box::pin(async move {
            let result = self.inner.get(&url).await;
            record_result(&self.recorder, "fetch", "get", &GetInput { url: &url }, &result);
            result
        })
    }
}
