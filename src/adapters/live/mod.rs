//! Live adapters for real external interactions.

pub mod fetcher;
pub mod filesystem;
pub mod llm;
pub mod queue;
pub mod storage;
