//! Recording adapter for the `MessageQueue` port.

use serde::Serialize;

use super::{record_result, SharedRecorder};
use crate::ports::{MessageQueue, SendFuture};

/// Records sent messages while delegating to an inner implementation.
pub struct RecordingQueue {
    inner: Box<dyn MessageQueue>,
    recorder: SharedRecorder,
}

impl RecordingQueue {
    /// Creates a recording queue wrapping the given implementation.
    pub fn new(inner: Box<dyn MessageQueue>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct SendInput<'a> {
    message: &'a str,
}

impl MessageQueue for RecordingQueue {
    fn send(&self, message: &str) -> SendFuture<'_> {
        let message = message.to_string();
        Box::pin(async move {
            let result = self.inner.send(&message).await;
            record_result(&self.recorder, "queue", "send", &SendInput { message: &message }, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::adapters::replaying::ReplayingQueue;
    use crate::cassette::format::Cassette;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::cassette::replayer::CassetteReplayer;

    #[tokio::test]
    async fn records_what_it_forwards() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("source.cassette.yaml");
        let mut source = CassetteRecorder::new(&source_path, "source", "compare");
        source.record("queue", "send", serde_json::json!({}), serde_json::json!({"ok": null}));
        source.record("queue", "send", serde_json::json!({}), serde_json::json!({"err": "boom"}));
        source.finish().unwrap();

        let replayer = Arc::new(Mutex::new(CassetteReplayer::load(&source_path).unwrap()));
        let out_path = dir.path().join("out.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&out_path, "out", "compare")));

        {
            let queue = RecordingQueue::new(
                Box::new(ReplayingQueue::new(replayer)),
                Arc::clone(&recorder),
            );
            assert!(queue.send("first").await.is_ok());
            assert!(queue.send("second").await.is_err());
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let cassette: Cassette =
            serde_yaml::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].input["message"], "first");
        assert_eq!(cassette.interactions[1].output["err"], "boom");
    }
}
