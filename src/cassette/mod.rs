//! Cassettes: recorded port interactions for deterministic replay.
//!
//! A run started with `AGENDA_WATCH_RECORD=<file>` captures every fetch,
//! completion and queue interaction; tests replay those files through
//! [`crate::context::ServiceContext::replaying`].

pub mod format;
pub mod recorder;
pub mod replayer;
