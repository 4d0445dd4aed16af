//! Change classification through the completion service.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ClassifyError;
use crate::ports::{ChatMessage, CompletionRequest, LlmClient};

const SYSTEM_PROMPT: &str = "Read the record, then compare source_content and new_content in detail. \
Give the level of change as one of 'LOW', 'MEDIUM', 'HIGH'. \
Respond with a JSON object with exactly these keys: \
\"document_name\" (the document name), \"level\" (the level of change), \
\"summary\" (a short summary of the differences).";

const MAX_TOKENS: u32 = 800;
const TOP_P: f32 = 0.95;

/// Severity of a detected change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum ChangeLevel {
    /// Cosmetic or minor edits.
    Low,
    /// Noticeable content changes.
    Medium,
    /// Substantial changes.
    High,
}

impl TryFrom<String> for ChangeLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(format!("unknown change level {value:?}")),
        }
    }
}

impl fmt::Display for ChangeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        })
    }
}

/// Structured verdict for one changed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeVerdict {
    /// Snapshot name of the document.
    #[serde(default, alias = "document name")]
    pub document_name: String,
    /// How much changed.
    #[serde(alias = "level of change")]
    pub level: ChangeLevel,
    /// Short description of the differences.
    #[serde(alias = "summary of different", alias = "summary of difference")]
    pub summary: String,
}

impl ChangeVerdict {
    /// Canonical JSON text placed on the queue.
    ///
    /// # Errors
    ///
    /// Returns an error only if serialization fails.
    pub fn to_message(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Result of classifying one changed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The service produced a valid verdict.
    Success(ChangeVerdict),
    /// No verdict could be obtained.
    Failure {
        /// Snapshot name of the document.
        document_name: String,
        /// Why classification failed.
        reason: String,
    },
}

impl Classification {
    /// Snapshot name of the classified document.
    #[must_use]
    pub fn document_name(&self) -> &str {
        match self {
            Self::Success(verdict) => &verdict.document_name,
            Self::Failure { document_name, .. } => document_name,
        }
    }
}

/// Parses the service's JSON answer into a verdict.
///
/// An absent or empty `document_name` falls back to `name`.
///
/// # Errors
///
/// Returns [`ClassifyError::InvalidVerdict`] if the text is not a three-key verdict object.
pub fn parse_verdict(text: &str, name: &str) -> Result<ChangeVerdict, ClassifyError> {
    let mut verdict: ChangeVerdict = serde_json::from_str(text.trim())?;
    if verdict.document_name.trim().is_empty() {
        verdict.document_name = name.to_string();
    }
    Ok(verdict)
}

/// Builds the completion request comparing two versions of a document.
#[must_use]
pub fn build_request(model: &str, name: &str, original: &str, current: &str) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "document name: {name}\n\n\
                 this is the original content: {original}\n\n\
                 this is the new content: {current}"
            )),
        ],
        max_tokens: MAX_TOKENS,
        temperature: 0.0,
        top_p: TOP_P,
        frequency_penalty: 0.0,
        presence_penalty: 0.0,
        json_object: true,
    }
}

/// Asks the completion service how much a document changed.
pub struct Classifier<'a> {
    llm: &'a dyn LlmClient,
    model: String,
}

impl<'a> Classifier<'a> {
    /// Creates a classifier using `model` (the deployment name) on `llm`.
    pub fn new(llm: &'a dyn LlmClient, model: impl Into<String>) -> Self {
        Self { llm, model: model.into() }
    }

    /// Classifies one changed document. Never fails; errors become
    /// [`Classification::Failure`].
    pub async fn classify(&self, name: &str, original: &str, current: &str) -> Classification {
        match self.try_classify(name, original, current).await {
            Ok(verdict) => Classification::Success(verdict),
            Err(e) => {
                warn!(document = name, "classification failed: {e}");
                Classification::Failure { document_name: name.to_string(), reason: e.to_string() }
            }
        }
    }

    async fn try_classify(
        &self,
        name: &str,
        original: &str,
        current: &str,
    ) -> Result<ChangeVerdict, ClassifyError> {
        let request = build_request(&self.model, name, original, current);
        let response = self.llm.complete(&request).await.map_err(ClassifyError::Completion)?;
        info!(
            document = name,
            prompt_tokens = response.prompt_tokens,
            completion_tokens = response.completion_tokens,
            "Input tokens: {}, Output tokens: {}",
            response.prompt_tokens,
            response.completion_tokens
        );
        parse_verdict(&response.text, name)
    }
}
