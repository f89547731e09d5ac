//! Image synthesis over an `OpenAI`-compatible `images/generations` API.
//!
//! Every request asks for exactly one square image returned inline as
//! base64, so the result can be stored next to the record without a second
//! download.

use hatchery_types::ImagePayload;

use crate::config::ImageBackendConfig;
use crate::error::GenerationError;
use crate::llm::read_json;

/// Square output size requested for all artwork.
pub const IMAGE_SIZE: &str = "1024x1024";

/// Client for the image synthesis endpoint.
pub struct ImageBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl ImageBackend {
    /// Create an image backend sharing the given HTTP client.
    pub fn new(client: reqwest::Client, config: &ImageBackendConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Generate one square image for the prompt.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Backend`] on HTTP failure and
    /// [`GenerationError::Malformed`] unless exactly one image comes back.
    pub async fn generate(&self, prompt: &str) -> Result<ImagePayload, GenerationError> {
        let url = format!("{}/images/generations", self.api_url);

        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "n": 1,
            "size": IMAGE_SIZE,
            "response_format": "b64_json"
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Backend(format!("image request failed: {e}")))?;

        let json = read_json(response, "image API").await?;
        extract_single_image(&json)
    }
}

/// Pull the single base64 image out of an `images/generations` response.
fn extract_single_image(json: &serde_json::Value) -> Result<ImagePayload, GenerationError> {
    let data = json
        .get("data")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| GenerationError::Malformed("image response missing data array".to_owned()))?;

    let [only] = data.as_slice() else {
        return Err(GenerationError::Malformed(format!(
            "expected exactly one image, got {}",
            data.len()
        )));
    };

    only.get("b64_json")
        .and_then(serde_json::Value::as_str)
        .filter(|b64| !b64.is_empty())
        .map(ImagePayload::png)
        .ok_or_else(|| GenerationError::Malformed("image response missing data[0].b64_json".to_owned()))
}
