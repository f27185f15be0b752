/// LLM Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All generative-model interactions MUST go through this module.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod catalog;
pub mod prompts;

use self::catalog::ModelInfo;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Fallback model when `GEMINI_MODEL` is not configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key configured — set GEMINI_API_KEY")]
    MissingCredential,

    #[error("network failure reaching the generation service: {0}")]
    Network(#[from] reqwest::Error),

    #[error("generation service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("generation service returned no usable text")]
    EmptyResponse,
}

/// The narrow seam between the pipeline and the hosted model: prompt in,
/// text or error out. Swap or mock implementations without touching the
/// prompt builder or the renderers.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (generateContent)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, trimmed.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let parts = &candidate.content.as_ref()?.parts;
        let joined: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        let joined = joined.trim();
        if joined.is_empty() {
            None
        } else {
            Some(joined.to_string())
        }
    }

    /// Reason the request was safety-filtered, if it was.
    fn block_reason(&self) -> Option<&str> {
        if let Some(feedback) = &self.prompt_feedback {
            if let Some(reason) = feedback.block_reason.as_deref() {
                return Some(reason);
            }
        }
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .filter(|r| *r == "SAFETY")
    }
}

#[derive(Debug, Deserialize)]
struct ModelListResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single Gemini client used by all services.
///
/// Credential absence is a `MissingCredential` error at call time, never a
/// startup crash, so the rest of the service (validation, rendering) stays
/// usable without a key.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    max_attempts: u32,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            max_attempts: 1,
        }
    }

    /// Bounded retry for transport failures only. `attempts` is the total
    /// number of tries; 1 (the default) disables retry entirely.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Same client pointed at a different hosted model variant.
    pub fn with_model(&self, model: impl Into<String>) -> Self {
        let mut clone = self.clone();
        clone.model = model.into();
        clone
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn key(&self) -> Result<&str, GenerationError> {
        self.api_key.as_deref().ok_or(GenerationError::MissingCredential)
    }

    /// Calls `models/{model}:generateContent` and extracts the candidate text.
    ///
    /// Transport errors (including timeouts) retry up to `max_attempts` with
    /// the 1 s / 2 s / 4 s backoff; service errors and empty responses are
    /// returned immediately.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        let key = self.key()?;

        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let url = format!("{GEMINI_API_BASE}/models/{}:generateContent", self.model);
        let mut last_error: Option<GenerationError> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "generation attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(GenerationError::Network(e));
                    continue;
                }
            };

            let status = response.status();
            let body = match response.text().await {
                Ok(b) => b,
                Err(e) => {
                    last_error = Some(GenerationError::Network(e));
                    continue;
                }
            };

            if !status.is_success() {
                let message = serde_json::from_str::<GoogleError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(GenerationError::Service {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: GenerateContentResponse =
                serde_json::from_str(&body).map_err(|e| GenerationError::Service {
                    status: status.as_u16(),
                    message: format!("unparseable response body: {e}"),
                })?;

            if let Some(reason) = parsed.block_reason() {
                return Err(GenerationError::Service {
                    status: status.as_u16(),
                    message: format!("request blocked by safety filter ({reason})"),
                });
            }

            let text = parsed.text().ok_or(GenerationError::EmptyResponse)?;

            if let Some(usage) = &parsed.usage_metadata {
                debug!(
                    "generation succeeded: prompt_tokens={:?}, candidate_tokens={:?}",
                    usage.prompt_token_count, usage.candidates_token_count
                );
            }

            return Ok(text);
        }

        Err(last_error.unwrap_or(GenerationError::EmptyResponse))
    }

    /// Lists the models the credential can reach.
    ///
    /// Callers typically feed the result to `catalog::pick_text_model` and
    /// fall back to `catalog::DEFAULT_MODELS` when this errors.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, GenerationError> {
        let key = self.key()?;

        let url = format!("{GEMINI_API_BASE}/models?pageSize=100");
        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<GoogleError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GenerationError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ModelListResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::Service {
                status: status.as_u16(),
                message: format!("unparseable model list: {e}"),
            })?;

        Ok(parsed.models)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.generate_text(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_without_key() -> GeminiClient {
        GeminiClient::new(None, DEFAULT_MODEL, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_generate_without_key_is_missing_credential() {
        let err = client_without_key().generate_text("hello").await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential));
    }

    #[tokio::test]
    async fn test_blank_key_is_missing_credential() {
        let client = GeminiClient::new(
            Some("   ".to_string()),
            DEFAULT_MODEL,
            Duration::from_secs(5),
        );
        let err = client.list_models().await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential));
    }

    #[test]
    fn test_with_model_overrides_variant() {
        let client = client_without_key().with_model("gemini-1.5-pro");
        assert_eq!(client.model(), "gemini-1.5-pro");
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "Jane "}, {"text": "Doe"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 20}
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("Jane Doe"));
        assert!(parsed.block_reason().is_none());
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.text().is_none());
    }

    #[test]
    fn test_safety_block_detected_from_prompt_feedback() {
        let json = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.block_reason(), Some("SAFETY"));
    }

    #[test]
    fn test_safety_block_detected_from_finish_reason() {
        let json = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.block_reason(), Some("SAFETY"));
        assert!(parsed.text().is_none());
    }

    #[test]
    fn test_google_error_body_parses() {
        let json = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let parsed: GoogleError = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.message, "API key not valid");
    }
}
