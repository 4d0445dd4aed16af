//! Service configuration collected once at startup.
//!
//! Components receive these structs through their constructors and never
//! read the process environment themselves.

use crate::error::ConfigError;

const DEFAULT_DEPLOYMENT: &str = "gpt-4o-mini";
const DEFAULT_API_VERSION: &str = "2024-03-01-preview";

/// Settings for the Azure OpenAI chat completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`.
    pub endpoint: String,
    /// Deployment (model) name.
    pub deployment: String,
    /// API key sent in the `api-key` header.
    pub api_key: String,
    /// `api-version` query parameter.
    pub api_version: String,
}

/// Settings for the Azure Storage queue that receives verdicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    /// Storage account connection string.
    pub connection_string: String,
    /// Name of the target queue.
    pub queue_name: String,
}

/// Everything the live adapters need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Completion service settings.
    pub completion: CompletionConfig,
    /// Queue settings.
    pub queue: QueueConfig,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for the first required value that is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for the first required value that is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing { key });

        let queue = QueueConfig {
            connection_string: require("CONN_STR")?,
            queue_name: require("QUEUE_NAME")?,
        };
        let completion = CompletionConfig {
            endpoint: require("ENDPOINT_URL")?,
            deployment: get("DEPLOYMENT_NAME").unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string()),
            api_key: require("AZURE_OPENAI_API_KEY")?,
            api_version: get("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        };

        Ok(Self { completion, queue })
    }
}
