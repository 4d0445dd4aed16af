//! Page fetcher port for plain HTTP GET requests.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::PortError;

/// Boxed future type alias used by [`PageFetcher`] to keep the trait dyn-compatible.
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<FetchedPage, PortError>> + Send + 'a>>;

/// A response to a GET request, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedPage {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl FetchedPage {
    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests for document locators.
///
/// Non-success statuses are returned as pages, not errors; only transport
/// failures produce `Err`.
pub trait PageFetcher: Send + Sync {
    /// Fetches the given URL.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure, timeout, or an unreadable body.
    fn get(&self, url: &str) -> FetchFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::FetchedPage;

    #[test]
    fn success_covers_2xx_only() {
        let page = |status| FetchedPage { status, body: String::new() };
        assert!(page(200).is_success());
        assert!(page(204).is_success());
        assert!(!page(301).is_success());
        assert!(!page(404).is_success());
        assert!(!page(500).is_success());
    }
}
