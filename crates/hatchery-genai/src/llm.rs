//! Text backend abstraction and implementations.
//!
//! Defines an enum-based dispatch for text backends, avoiding the
//! dyn-compatibility issues with async trait methods. Concrete
//! implementations exist for OpenAI-compatible APIs and the Anthropic
//! Messages API. All backends communicate over HTTP via `reqwest`.
//!
//! Every call is constrained to a JSON schema. `OpenAI`-compatible backends
//! enforce it server-side through `response_format`; Anthropic receives it
//! in the system prompt and the reply is validated by [`crate::parse`].

use std::time::Duration;

use crate::config::{BackendType, TextBackendConfig};
use crate::error::GenerationError;
use crate::prompt::RenderedPrompt;

/// Maximum tokens requested for one JSON reply.
const MAX_OUTPUT_TOKENS: u32 = 400;

// ---------------------------------------------------------------------------
// Unified backend enum (dyn-compatible alternative to async trait)
// ---------------------------------------------------------------------------

/// A text backend that answers a prompt with a JSON object.
///
/// Uses enum dispatch instead of trait objects because async methods
/// are not dyn-compatible in Rust.
pub enum TextBackend {
    /// OpenAI-compatible chat completions API.
    OpenAi(OpenAiBackend),
    /// Anthropic Messages API.
    Anthropic(AnthropicBackend),
}

impl TextBackend {
    /// Send a prompt and return the raw reply text.
    ///
    /// `schema_name` and `schema` describe the required JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Backend`] if the HTTP call fails or the
    /// reply text cannot be extracted.
    pub async fn complete_json(
        &self,
        prompt: &RenderedPrompt,
        schema_name: &str,
        schema: &serde_json::Value,
    ) -> Result<String, GenerationError> {
        match self {
            Self::OpenAi(backend) => backend.complete_json(prompt, schema_name, schema).await,
            Self::Anthropic(backend) => backend.complete_json(prompt, schema).await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::OpenAi(_) => "openai-compatible",
            Self::Anthropic(_) => "anthropic",
        }
    }
}

// ---------------------------------------------------------------------------
// OpenAI-compatible backend
// ---------------------------------------------------------------------------

/// Backend for OpenAI-compatible chat completions APIs.
///
/// Sends requests to `{api_url}/chat/completions` with a strict
/// `json_schema` response format.
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiBackend {
    async fn complete_json(
        &self,
        prompt: &RenderedPrompt,
        schema_name: &str,
        schema: &serde_json::Value,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/chat/completions", self.api_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user}
            ],
            "temperature": 0.9,
            "max_tokens": MAX_OUTPUT_TOKENS,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": schema_name,
                    "strict": true,
                    "schema": schema
                }
            }
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Backend(format!("OpenAI request failed: {e}")))?;

        let json = read_json(response, "OpenAI").await?;
        extract_openai_content(&json)
    }
}

/// Extract the text content from an `OpenAI` chat completions response.
fn extract_openai_content(json: &serde_json::Value) -> Result<String, GenerationError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            GenerationError::Backend(
                "OpenAI response missing choices[0].message.content".to_owned(),
            )
        })
}

// ---------------------------------------------------------------------------
// Anthropic Messages API backend
// ---------------------------------------------------------------------------

/// Backend for the Anthropic Messages API.
///
/// Anthropic uses a different request format from `OpenAI`:
/// - Uses `x-api-key` header instead of `Authorization: Bearer`
/// - System prompt is a top-level field
/// - Response structure differs: `content[0].text`
pub struct AnthropicBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl AnthropicBackend {
    async fn complete_json(
        &self,
        prompt: &RenderedPrompt,
        schema: &serde_json::Value,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/messages", self.api_url);

        let system = format!(
            "{}\n\nRespond with only a JSON object matching this JSON schema:\n{schema}",
            prompt.system
        );

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": MAX_OUTPUT_TOKENS,
            "system": system,
            "messages": [
                {"role": "user", "content": prompt.user}
            ]
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Backend(format!("Anthropic request failed: {e}")))?;

        let json = read_json(response, "Anthropic").await?;
        extract_anthropic_content(&json)
    }
}

/// Extract the text content from an Anthropic Messages API response.
fn extract_anthropic_content(json: &serde_json::Value) -> Result<String, GenerationError> {
    json.get("content")
        .and_then(|c| c.get(0))
        .and_then(|b| b.get("text"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            GenerationError::Backend("Anthropic response missing content[0].text".to_owned())
        })
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Turn a non-success status into a [`GenerationError::Backend`] carrying
/// the error body, otherwise decode the JSON body.
pub(crate) async fn read_json(
    response: reqwest::Response,
    provider: &str,
) -> Result<serde_json::Value, GenerationError> {
    let status = response.status();
    if !status.is_success() {
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error body".to_owned());
        return Err(GenerationError::Backend(format!(
            "{provider} returned {status}: {error_body}"
        )));
    }

    response
        .json()
        .await
        .map_err(|e| GenerationError::Backend(format!("{provider} response parse failed: {e}")))
}

/// Build the shared HTTP client with the configured timeout.
///
/// # Errors
///
/// Returns [`GenerationError::Config`] if the client cannot be constructed.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, GenerationError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| GenerationError::Config(format!("failed to build HTTP client: {e}")))
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Create a text backend from configuration.
///
/// Dispatches to [`OpenAiBackend`] or [`AnthropicBackend`] based on the
/// configured [`BackendType`].
pub fn create_text_backend(client: reqwest::Client, config: &TextBackendConfig) -> TextBackend {
    match config.backend_type {
        BackendType::OpenAi => TextBackend::OpenAi(OpenAiBackend {
            client,
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }),
        BackendType::Anthropic => TextBackend::Anthropic(AnthropicBackend {
            client,
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }),
    }
}
