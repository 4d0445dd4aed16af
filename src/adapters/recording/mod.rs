//! Recording adapters that capture interactions to a cassette.

pub mod fetcher;
pub mod llm;
pub mod queue;

pub use fetcher::RecordingFetcher;
pub use llm::RecordingLlmClient;
pub use queue::RecordingQueue;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Shared handle to the recorder all recording adapters write into.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Record a `Result<T, E>` interaction.
///
/// Convention, mirrored by `replaying::replay_result`:
/// - `Ok(v)` is stored as `{"ok": v}`
/// - `Err(e)` is stored as `{"err": e.to_string()}`
pub(crate) fn record_result<T, E, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input_json = serde_json::to_value(input).unwrap_or(serde_json::Value::Null);

    let output_json = match result {
        Ok(v) => match serde_json::to_value(v) {
            Ok(inner) => serde_json::json!({ "ok": inner }),
            Err(e) => serde_json::json!({ "err": format!("unserializable output: {e}") }),
        },
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };

    let mut guard = recorder.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    guard.record(port, method, input_json, output_json);
}
