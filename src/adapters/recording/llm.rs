//! Recording adapter for the `LlmClient` port.

use super::{record_result, SharedRecorder};
use crate::ports::{CompletionFuture, CompletionRequest, LlmClient};

/// Records completions while delegating to an inner implementation.
pub struct RecordingLlmClient {
    inner: Box<dyn LlmClient>,
    recorder: SharedRecorder,
}

impl RecordingLlmClient {
    /// Creates a recording LLM client wrapping the given implementation.
    pub fn new(inner: Box<dyn LlmClient>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl LlmClient for RecordingLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.complete(&request).await;
            record_result(&self.recorder, "llm", "complete", &request, &result);
            result
        })
    }
}
