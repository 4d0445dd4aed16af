//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the change-detection pipeline
//! and an external system (local disk, remote pages, completion service,
//! message queue). Implementations live in `src/adapters/`.

pub mod fetcher;
pub mod filesystem;
pub mod llm;
pub mod queue;

pub use crate::error::PortError;
pub use fetcher::{FetchFuture, FetchedPage, PageFetcher};
pub use filesystem::FileSystem;
pub use llm::{ChatMessage, CompletionFuture, CompletionRequest, CompletionResponse, LlmClient, Role};
pub use queue::{MessageQueue, SendFuture};
