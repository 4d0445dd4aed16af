//! Replaying adapters that serve recorded interactions.

pub mod fetcher;
pub mod llm;
pub mod queue;

pub use fetcher::ReplayingFetcher;
pub use llm::ReplayingLlmClient;
pub use queue::ReplayingQueue;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::PortError;

/// Shared handle to the replayer all replaying adapters read from.
pub type SharedReplayer = Arc<Mutex<CassetteReplayer>>;

/// Take the output of the next recorded interaction for `port::method`.
pub(crate) fn next_output(replayer: &SharedReplayer, port: &str, method: &str) -> serde_json::Value {
    let mut guard = replayer.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    guard.next_interaction(port, method).output
}

/// Turn a recorded `{"ok": ..}` / `{"err": ".."}` output back into a `Result`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, PortError> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
