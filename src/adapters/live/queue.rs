//! Live adapter for the `MessageQueue` port using the Azure Storage Queue REST API.

use chrono::Utc;
use reqwest::Client;
use url::Url;

use super::storage::{self, Credential, StorageConnection, STORAGE_VERSION};
use crate::config::QueueConfig;
use crate::error::{ConfigError, PortError, QueueError};
use crate::ports::queue::{MessageQueue, SendFuture};

const CONTENT_TYPE: &str = "application/xml";

/// Sends messages to one Azure Storage queue.
pub struct AzureQueueClient {
    client: Client,
    url: Url,
    credential: Credential,
}

impl AzureQueueClient {
    /// Creates a queue client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConnectionString`] if the connection string cannot be parsed.
    pub fn new(client: Client, config: &QueueConfig) -> Result<Self, ConfigError> {
        let connection = StorageConnection::parse(&config.connection_string)?;
        let url = connection.messages_url(&config.queue_name)?;
        Ok(Self { client, url, credential: connection.credential })
    }

    async fn put_message(&self, message: &str) -> Result<(), QueueError> {
        let body = message_body(message);
        let ms_date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();

        let mut request = self
            .client
            .post(self.url.clone())
            .header("x-ms-date", &ms_date)
            .header("x-ms-version", STORAGE_VERSION)
            .header("content-type", CONTENT_TYPE);

        if let Credential::SharedKey { account, key } = &self.credential {
            let resource = storage::canonical_resource(account, &self.url);
            let to_sign = storage::string_to_sign(body.len(), CONTENT_TYPE, &ms_date, &resource);
            request = request.header("authorization", storage::authorization(account, key, &to_sign));
        }

        let response = request.body(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QueueError::Rejected { status: status.as_u16(), body });
        }
        Ok(())
    }
}

/// Wraps message text in the `QueueMessage` XML envelope.
fn message_body(message: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <QueueMessage><MessageText>{}</MessageText></QueueMessage>",
        quick_xml::escape::escape(message)
    )
}

impl MessageQueue for AzureQueueClient {
    fn send(&self, message: &str) -> SendFuture<'_> {
        let message = message.to_string();
        Box::pin(async move { self.put_message(&message).await.map_err(PortError::from) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(connection_string: String) -> QueueConfig {
        QueueConfig { connection_string, queue_name: "changes".into() }
    }

    #[test]
    fn message_body_escapes_markup() {
        let body = message_body(r#"{"summary":"a < b & c"}"#);
        assert!(body.contains(
            "<MessageText>{&quot;summary&quot;:&quot;a &lt; b &amp; c&quot;}</MessageText>"
        ));
    }

    #[tokio::test]
    async fn shared_key_request_is_signed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/acct/changes/messages"))
            .and(header("x-ms-version", STORAGE_VERSION))
            .and(header_exists("x-ms-date"))
            .and(header_exists("authorization"))
            .and(body_string_contains("<MessageText>hello</MessageText>"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let conn = format!(
            "QueueEndpoint={}/acct;AccountName=acct;AccountKey=dGVzdC1hY2NvdW50LWtleQ==",
            server.uri()
        );
        let queue = AzureQueueClient::new(Client::new(), &config(conn)).unwrap();
        queue.send("hello").await.unwrap();
    }

    #[tokio::test]
    async fn sas_request_carries_signature_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/changes/messages"))
            .and(query_param("sig", "abc"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let conn = format!("QueueEndpoint={};SharedAccessSignature=sv=2020-08-04&sig=abc", server.uri());
        let queue = AzureQueueClient::new(Client::new(), &config(conn)).unwrap();
        queue.send("hello").await.unwrap();
    }

    #[tokio::test]
    async fn rejected_message_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("<Error><Code>QueueNotFound</Code></Error>"))
            .mount(&server)
            .await;

        let conn = format!("QueueEndpoint={};SharedAccessSignature=sig=abc", server.uri());
        let queue = AzureQueueClient::new(Client::new(), &config(conn)).unwrap();
        let err = queue.send("hello").await.unwrap_err();

        assert!(err.to_string().contains("HTTP 404"));
        assert!(err.to_string().contains("QueueNotFound"));
    }
}
