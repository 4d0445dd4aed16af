//! Error types for configuration, per-item pipeline failures, and the CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by port trait implementations.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Missing or malformed startup configuration. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment value is unset or empty.
    #[error("missing required configuration value {key}")]
    Missing {
        /// Environment variable name.
        key: &'static str,
    },

    /// The storage connection string could not be interpreted.
    #[error("invalid storage connection string: {reason}")]
    ConnectionString {
        /// What was wrong with it.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Failure to turn one document reference into a snapshot file.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("request to {locator} failed: {source}")]
    Request {
        /// The locator that was requested.
        locator: String,
        /// Underlying port error.
        source: PortError,
    },

    /// The server answered with a non-success status.
    #[error("request to {locator} returned HTTP {status}")]
    Status {
        /// The locator that was requested.
        locator: String,
        /// Response status code.
        status: u16,
    },

    /// The page has no `div.content` element.
    #[error("no content container found at {locator}")]
    MissingContent {
        /// The locator that was requested.
        locator: String,
    },

    /// Writing the snapshot file failed.
    #[error("failed to write snapshot {}: {source}", path.display())]
    Write {
        /// Snapshot file path.
        path: PathBuf,
        /// Underlying port error.
        source: PortError,
    },
}

/// Failure to obtain a valid verdict from the completion service.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The completion call itself failed.
    #[error("completion request failed: {0}")]
    Completion(PortError),

    /// The service answered with something that is not a verdict.
    #[error("completion response is not a valid verdict: {0}")]
    InvalidVerdict(#[from] serde_json::Error),
}

/// Failure to put a message on the queue.
#[derive(Debug, Error)]
pub enum QueueError {
    /// Transport-level failure.
    #[error("queue request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The queue service rejected the message.
    #[error("queue service returned HTTP {status}: {body}")]
    Rejected {
        /// Response status code.
        status: u16,
        /// Response body, usually an XML error document.
        body: String,
    },
}

/// Top-level error returned from the library entry point.
#[derive(Debug, Error)]
pub enum Error {
    /// Command-line parsing failed (includes `--help` and `--version` output).
    #[error("{0}")]
    Cli(#[from] clap::Error),

    /// Startup configuration is incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The agenda file could not be read.
    #[error("failed to read agenda {}: {source}", path.display())]
    Agenda {
        /// Agenda file path.
        path: PathBuf,
        /// Underlying port error.
        source: PortError,
    },

    /// A snapshot directory could not be created or listed.
    #[error("snapshot directory {}: {source}", path.display())]
    Snapshot {
        /// Directory path.
        path: PathBuf,
        /// Underlying port error.
        source: PortError,
    },

    /// Runtime or cassette I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A cassette could not be parsed.
    #[error("failed to parse cassette {}: {source}", path.display())]
    Cassette {
        /// Cassette file path.
        path: PathBuf,
        /// YAML error.
        source: serde_yaml::Error,
    },
}
