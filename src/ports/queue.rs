//! Message queue port.

use std::future::Future;
use std::pin::Pin;

use crate::error::PortError;

/// Boxed future type alias used by [`MessageQueue`].
pub type SendFuture<'a> = Pin<Box<dyn Future<Output = Result<(), PortError>> + Send + 'a>>;

/// Places text messages on a pre-configured queue.
pub trait MessageQueue: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue service could not be reached or rejected the message.
    fn send(&self, message: &str) -> SendFuture<'_>;
}
