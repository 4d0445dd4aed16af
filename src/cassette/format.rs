//! Cassette data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name: `"fetch"`, `"llm"` or `"queue"`.
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    #[serde(default)]
    pub input: serde_json::Value,
    /// Output data returned from the port, as `{"ok": ..}` or `{"err": ".."}`.
    pub output: serde_json::Value,
}

/// A cassette containing the interactions of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Subcommand that produced the recording (`init` or `compare`).
    pub command: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hand_written_cassette_without_inputs() {
        let yaml = r"
name: hand-written
recorded_at: 2026-10-19T08:00:00Z
command: compare
interactions:
  - seq: 0
    port: fetch
    method: get
    output:
      ok:
        status: 200
        body: <div class='content'>hello</div>
";
        let cassette: Cassette = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cassette.command, "compare");
        assert_eq!(cassette.interactions.len(), 1);
        assert!(cassette.interactions[0].input.is_null());
        assert_eq!(cassette.interactions[0].output["ok"]["status"], 200);
    }
}
