//! Configuration types for the generation client.
//!
//! Loaded from environment variables: which text backend to use (with its
//! URL, API key, and model name) and where to send image requests.

use std::time::Duration;

use crate::error::GenerationError;

/// Default per-request timeout enforced by the HTTP client.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 90;

/// Default image model when `LLM_IMAGE_MODEL` is unset.
const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Complete generation client configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Text (JSON) completion backend.
    pub text: TextBackendConfig,
    /// Image synthesis backend.
    pub image: ImageBackendConfig,
    /// Maximum time for a single HTTP request.
    pub request_timeout: Duration,
    /// Directory overriding the built-in prompt templates.
    pub templates_dir: Option<String>,
}

/// Configuration for the text completion backend.
#[derive(Debug, Clone)]
pub struct TextBackendConfig {
    /// The backend type.
    pub backend_type: BackendType,
    /// Base API URL (e.g. `https://api.openai.com/v1`).
    pub api_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
}

/// Configuration for the image synthesis backend.
///
/// Always an `OpenAI`-compatible `images/generations` endpoint.
#[derive(Debug, Clone)]
pub struct ImageBackendConfig {
    /// Base API URL.
    pub api_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
}

/// Supported text backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// `OpenAI`-compatible chat completions API with JSON-schema output.
    OpenAi,
    /// Anthropic Messages API.
    Anthropic,
}

impl BackendType {
    /// Parse a backend name as written in the environment.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] for unknown names.
    pub fn parse(name: &str) -> Result<Self, GenerationError> {
        match name.to_lowercase().as_str() {
            "openai" | "deepseek" | "ollama" => Ok(Self::OpenAi),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            other => Err(GenerationError::Config(format!(
                "unknown backend type: {other}"
            ))),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from environment variables.
    ///
    /// Required variables:
    /// - `LLM_TEXT_BACKEND` -- text backend type (`openai`, `anthropic`, ...)
    /// - `LLM_TEXT_API_URL` -- text API base URL
    /// - `LLM_TEXT_API_KEY` -- text API key
    /// - `LLM_TEXT_MODEL` -- text model name
    /// - `LLM_IMAGE_API_URL` -- image API base URL
    /// - `LLM_IMAGE_API_KEY` -- image API key
    ///
    /// Optional variables:
    /// - `LLM_IMAGE_MODEL` -- image model name (default `dall-e-3`)
    /// - `HATCHERY_REQUEST_TIMEOUT_SECS` -- per-request timeout (default 90)
    /// - `HATCHERY_TEMPLATES_DIR` -- prompt template overrides
    pub fn from_env() -> Result<Self, GenerationError> {
        let text = TextBackendConfig {
            backend_type: BackendType::parse(&env_var("LLM_TEXT_BACKEND")?)?,
            api_url: env_var("LLM_TEXT_API_URL")?,
            api_key: env_var("LLM_TEXT_API_KEY")?,
            model: env_var("LLM_TEXT_MODEL")?,
        };

        let image = ImageBackendConfig {
            api_url: env_var("LLM_IMAGE_API_URL")?,
            api_key: env_var("LLM_IMAGE_API_KEY")?,
            model: std::env::var("LLM_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_owned()),
        };

        let timeout_secs: u64 = std::env::var("HATCHERY_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|e| {
                GenerationError::Config(format!("invalid HATCHERY_REQUEST_TIMEOUT_SECS: {e}"))
            })?;

        let templates_dir = std::env::var("HATCHERY_TEMPLATES_DIR").ok();

        Ok(Self {
            text,
            image,
            request_timeout: Duration::from_secs(timeout_secs),
            templates_dir,
        })
    }
}

/// Read a required environment variable.
fn env_var(name: &str) -> Result<String, GenerationError> {
    std::env::var(name)
        .map_err(|e| GenerationError::Config(format!("missing required env var {name}: {e}")))
}
