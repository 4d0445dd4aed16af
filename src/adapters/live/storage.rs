//! Azure Storage connection strings and SharedKey request signing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::Url;

use crate::error::ConfigError;

/// REST API version sent in `x-ms-version`.
pub const STORAGE_VERSION: &str = "2018-03-28";

const DEV_ACCOUNT: &str = "devstoreaccount1";
const DEV_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
const DEV_QUEUE_ENDPOINT: &str = "http://127.0.0.1:10001/devstoreaccount1";

/// How requests to the queue service are authorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Account name plus decoded account key, used for SharedKey signatures.
    SharedKey {
        /// Storage account name.
        account: String,
        /// Raw account key bytes.
        key: Vec<u8>,
    },
    /// Shared access signature appended to every request URL.
    Sas(String),
}

/// A parsed storage connection string, reduced to what the queue client needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConnection {
    /// Base URL of the queue service.
    pub queue_endpoint: Url,
    /// Request authorization.
    pub credential: Credential,
}

impl StorageConnection {
    /// Parses a `Key=Value;Key=Value` storage connection string.
    ///
    /// Supports account-key strings (`AccountName`, `AccountKey`,
    /// `DefaultEndpointsProtocol`, `EndpointSuffix`), explicit `QueueEndpoint`
    /// overrides, `SharedAccessSignature`, and `UseDevelopmentStorage=true`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConnectionString`] when no credential or endpoint can be derived.
    pub fn parse(connection_string: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::ConnectionString { reason: reason.to_string() };

        let mut protocol = "https";
        let mut suffix = "core.windows.net";
        let mut account = None;
        let mut key = None;
        let mut endpoint = None;
        let mut sas = None;

        for part in connection_string.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = part
                .split_once('=')
                .ok_or_else(|| invalid(&format!("segment without '=': {part}")))?;
            match name {
                "DefaultEndpointsProtocol" => protocol = value,
                "EndpointSuffix" => suffix = value,
                "AccountName" => account = Some(value),
                "AccountKey" => key = Some(value),
                "QueueEndpoint" => endpoint = Some(value),
                "SharedAccessSignature" => sas = Some(value),
                "UseDevelopmentStorage" if value.eq_ignore_ascii_case("true") => {
                    account = Some(DEV_ACCOUNT);
                    key = Some(DEV_KEY);
                    endpoint = endpoint.or(Some(DEV_QUEUE_ENDPOINT));
                }
                _ => {}
            }
        }

        let credential = match (sas, account, key) {
            (Some(sas), _, _) => Credential::Sas(sas.trim_start_matches('?').to_string()),
            (None, Some(account), Some(key)) => Credential::SharedKey {
                account: account.to_string(),
                key: STANDARD.decode(key).map_err(|e| invalid(&format!("AccountKey: {e}")))?,
            },
            _ => return Err(invalid("expected AccountName and AccountKey or SharedAccessSignature")),
        };

        let endpoint = match (endpoint, account) {
            (Some(endpoint), _) => endpoint.to_string(),
            (None, Some(account)) => format!("{protocol}://{account}.queue.{suffix}"),
            (None, None) => return Err(invalid("expected QueueEndpoint or AccountName")),
        };
        let queue_endpoint =
            Url::parse(&endpoint).map_err(|e| invalid(&format!("queue endpoint {endpoint}: {e}")))?;

        Ok(Self { queue_endpoint, credential })
    }

    /// URL of the "Put Message" operation for `queue_name`, SAS applied if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConnectionString`] if the resulting URL is invalid.
    pub fn messages_url(&self, queue_name: &str) -> Result<Url, ConfigError> {
        let base = self.queue_endpoint.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{queue_name}/messages")).map_err(|e| {
            ConfigError::ConnectionString { reason: format!("queue URL for {queue_name}: {e}") }
        })?;
        if let Credential::Sas(sas) = &self.credential {
            url.set_query(Some(sas));
        }
        Ok(url)
    }
}

/// Builds the SharedKey string-to-sign for a POST with `x-ms-date` and `x-ms-version`.
#[must_use]
pub fn string_to_sign(
    content_length: usize,
    content_type: &str,
    ms_date: &str,
    canonical_resource: &str,
) -> String {
    let length = if content_length == 0 { String::new() } else { content_length.to_string() };
    format!(
        "POST\n\n\n{length}\n\n{content_type}\n\n\n\n\n\n\n\
         x-ms-date:{ms_date}\nx-ms-version:{STORAGE_VERSION}\n{canonical_resource}"
    )
}

/// Canonicalized resource for a request URL: `/<account><path>`.
#[must_use]
pub fn canonical_resource(account: &str, url: &Url) -> String {
    format!("/{account}{}", url.path())
}

/// Computes the `Authorization` header value for a SharedKey request.
#[must_use]
pub fn authorization(account: &str, key: &[u8], string_to_sign: &str) -> String {
    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(string_to_sign.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());
    format!("SharedKey {account}:{signature}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_account_key_string() {
        let conn = StorageConnection::parse(
            "DefaultEndpointsProtocol=https;AccountName=acct;AccountKey=dGVzdC1hY2NvdW50LWtleQ==;EndpointSuffix=core.windows.net",
        )
        .unwrap();

        assert_eq!(conn.queue_endpoint.as_str(), "https://acct.queue.core.windows.net/");
        assert_eq!(
            conn.credential,
            Credential::SharedKey { account: "acct".into(), key: b"test-account-key".to_vec() }
        );
        assert_eq!(
            conn.messages_url("changes").unwrap().as_str(),
            "https://acct.queue.core.windows.net/changes/messages"
        );
    }

    #[test]
    fn parses_sas_string() {
        let conn = StorageConnection::parse(
            "QueueEndpoint=https://acct.queue.core.windows.net/;SharedAccessSignature=sv=2020-08-04&sig=abc%3D",
        )
        .unwrap();

        assert_eq!(
            conn.messages_url("changes").unwrap().as_str(),
            "https://acct.queue.core.windows.net/changes/messages?sv=2020-08-04&sig=abc%3D"
        );
    }

    #[test]
    fn development_storage_uses_path_style_endpoint() {
        let conn = StorageConnection::parse("UseDevelopmentStorage=true").unwrap();
        let url = conn.messages_url("changes").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:10001/devstoreaccount1/changes/messages");
        assert_eq!(
            canonical_resource(DEV_ACCOUNT, &url),
            "/devstoreaccount1/devstoreaccount1/changes/messages"
        );
    }

    #[test]
    fn rejects_string_without_credentials() {
        let err = StorageConnection::parse("AccountName=acct").unwrap_err();
        assert!(err.to_string().contains("AccountKey"));
    }

    #[test]
    fn rejects_undecodable_key() {
        let err = StorageConnection::parse("AccountName=acct;AccountKey=not base64!").unwrap_err();
        assert!(err.to_string().contains("AccountKey"));
    }

    #[test]
    fn signs_known_request() {
        let to_sign = string_to_sign(
            88,
            "application/xml",
            "Mon, 19 Oct 2026 08:00:00 GMT",
            "/acct/changes/messages",
        );
        assert_eq!(to_sign.lines().count(), 15);

        let header = authorization("acct", b"test-account-key", &to_sign);
        assert_eq!(header, "SharedKey acct:b21YuBeQEEdgKGgoE6gvncJ9AI6nWzwuWyoNQchjtNg=");
    }
}
