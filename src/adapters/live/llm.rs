//! Live adapter for the `LlmClient` port using the Azure OpenAI chat completions API.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::CompletionConfig;
use crate::error::PortError;
use crate::ports::llm::{
    ChatMessage, CompletionFuture, CompletionRequest, CompletionResponse, LlmClient,
};

/// Live LLM client that calls an Azure OpenAI deployment.
///
/// The request's `model` field selects the deployment.
pub struct AzureOpenAiClient {
    client: Client,
    config: CompletionConfig,
}

impl AzureOpenAiClient {
    /// Creates a client sharing the given HTTP client.
    #[must_use]
    pub fn new(client: Client, config: CompletionConfig) -> Self {
        Self { client, config }
    }

    fn completions_url(&self, deployment: &str) -> String {
        format!(
            "{}/openai/deployments/{deployment}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

/// Request body sent to the chat completions endpoint.
#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Error envelope returned by the service.
#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl LlmClient for AzureOpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let body = ChatRequest {
                messages: &request.messages,
                max_tokens: request.max_tokens,
                temperature: request.temperature,
                top_p: request.top_p,
                frequency_penalty: request.frequency_penalty,
                presence_penalty: request.presence_penalty,
                response_format: request.json_object.then_some(ResponseFormat { kind: "json_object" }),
            };

            let response = self
                .client
                .post(self.completions_url(&request.model))
                .query(&[("api-version", self.config.api_version.as_str())])
                .header("api-key", &self.config.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> PortError { format!("Completion request failed: {e}").into() })?;

            let status = response.status();
            let response_text = response
                .text()
                .await
                .map_err(|e| -> PortError { format!("Failed to read completion response: {e}").into() })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<ApiError>(&response_text)
                    .map(|e| e.error.message)
                    .unwrap_or(response_text);
                return Err(format!("Completion API error ({}): {msg}", status.as_u16()).into());
            }

            let api_response: ChatResponse = serde_json::from_str(&response_text).map_err(
                |e| -> PortError { format!("Failed to parse completion response: {e}").into() },
            )?;

            let text = api_response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .ok_or_else(|| -> PortError { "Completion response has no content".into() })?;
            let (prompt_tokens, completion_tokens) = api_response
                .usage
                .map_or((0, 0), |usage| (usage.prompt_tokens, usage.completion_tokens));

            Ok(CompletionResponse { text, prompt_tokens, completion_tokens })
        })
    }
}
