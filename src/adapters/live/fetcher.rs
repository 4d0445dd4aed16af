//! Live adapter for the `PageFetcher` port using `reqwest`.

use std::time::Duration;

use reqwest::Client;

use crate::error::PortError;
use crate::ports::fetcher::{FetchFuture, FetchedPage, PageFetcher};

/// Upper bound on a single document fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Live fetcher that issues plain GET requests with no extra headers.
pub struct LiveFetcher {
    client: Client,
    timeout: Duration,
}

impl LiveFetcher {
    /// Creates a fetcher sharing the given client, with the default timeout.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client, timeout: DEFAULT_FETCH_TIMEOUT }
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl PageFetcher for LiveFetcher {
    fn get(&self, url: &str) -> FetchFuture<'_> {
        let url = url.to_string();

        Box::pin(async move {
            let response = self
                .client
                .get(&url)
                .timeout(self.timeout)
                .send()
                .await
                .map_err(|e| -> PortError { format!("GET {url} failed: {e}").into() })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| -> PortError { format!("Failed to read body of {url}: {e}").into() })?;

            Ok(FetchedPage { status, body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>héllo</p>"))
            .mount(&server)
            .await;

        let fetcher = LiveFetcher::new(Client::new());
        let page = fetcher.get(&format!("{}/a", server.uri())).await.unwrap();

        assert_eq!(page.status, 200);
        assert_eq!(page.body, "<p>héllo</p>");
    }

    #[tokio::test]
    async fn non_success_status_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = LiveFetcher::new(Client::new());
        let page = fetcher.get(&format!("{}/missing", server.uri())).await.unwrap();

        assert_eq!(page.status, 404);
        assert!(!page.is_success());
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let fetcher = LiveFetcher::new(Client::new()).with_timeout(Duration::from_millis(50));
        let err = fetcher.get(&format!("{}/slow", server.uri())).await.unwrap_err();

        assert!(err.to_string().contains("failed"));
    }
}
