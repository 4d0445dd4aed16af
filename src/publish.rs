//! Publishing verdicts to the message queue.

use tracing::{error, info, warn};

use crate::classify::Classification;
use crate::ports::MessageQueue;

/// What happened to one classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The verdict was accepted by the queue.
    Published,
    /// The queue send failed; the message was dropped.
    Failed,
    /// Classification failed, so nothing was sent.
    Skipped,
}

/// Sends successful verdicts to the queue, one message each.
pub struct Publisher<'a> {
    queue: &'a dyn MessageQueue,
}

impl<'a> Publisher<'a> {
    /// Creates a publisher sending to `queue`.
    #[must_use]
    pub fn new(queue: &'a dyn MessageQueue) -> Self {
        Self { queue }
    }

    /// Publishes a classification. Errors are logged, never returned.
    pub async fn publish(&self, classification: &Classification) -> PublishOutcome {
        let verdict = match classification {
            Classification::Success(verdict) => verdict,
            Classification::Failure { document_name, reason } => {
                warn!(document = %document_name, "not publishing unclassified change: {reason}");
                return PublishOutcome::Skipped;
            }
        };

        let message = match verdict.to_message() {
            Ok(message) => message,
            Err(e) => {
                error!(document = %verdict.document_name, "failed to serialize verdict: {e}");
                return PublishOutcome::Failed;
            }
        };

        match self.queue.send(&message).await {
            Ok(()) => {
                info!(document = %verdict.document_name, level = %verdict.level, "published change");
                PublishOutcome::Published
            }
            Err(e) => {
                error!(document = %verdict.document_name, "Failed to push message to queue: {e}");
                PublishOutcome::Failed
            }
        }
    }
}
