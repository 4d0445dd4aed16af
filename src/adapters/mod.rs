//! Port implementations: live network/disk access, cassette recording, and replay.

pub mod live;
pub mod recording;
pub mod replaying;
