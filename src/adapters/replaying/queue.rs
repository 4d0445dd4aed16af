//! Replaying adapter for the `MessageQueue` port.

use super::{next_output, replay_result, SharedReplayer};
use crate::ports::{MessageQueue, SendFuture};

/// Serves recorded send outcomes from a cassette.
pub struct ReplayingQueue {
    replayer: SharedReplayer,
}

impl ReplayingQueue {
    /// Creates a replaying queue backed by the given replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }
}

impl MessageQueue for ReplayingQueue {
    fn send(&self, _message: &str) -> SendFuture<'_> {
        let output = next_output(&self.replayer, "queue", "send");
        Box::pin(async move { replay_result::<()>(output, "queue::send") })
    }
}
