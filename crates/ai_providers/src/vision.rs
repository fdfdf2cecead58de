//! OpenAI vision client
//!
//! Describes uploaded images for the `/describe-image` endpoint. The image
//! travels inline as a base64 data URL inside an `image_url` content part.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use crate::config::ProviderConfig;
use crate::error::{ProviderError, from_openai_failure};

/// System prompt for accessibility-oriented image description
const DESCRIBE_SYSTEM_PROMPT: &str = "You are an AI assistant for blind people. Please describe \
     the content of the image clearly, with as much detail as possible including objects, \
     people, colors, text, and spatial relationships.";

/// Client for image description via the OpenAI vision model
#[derive(Debug, Clone)]
pub struct VisionClient {
    client: Client,
    config: ProviderConfig,
}

#[derive(Debug, Serialize)]
struct VisionRequest<'a> {
    model: &'a str,
    messages: [serde_json::Value; 2],
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct VisionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl VisionClient {
    /// Create a new vision client
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Configuration` if the configuration is invalid.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        config.validate().map_err(ProviderError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                ProviderError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> &str {
        self.config.openai_api_key.as_deref().unwrap_or_default()
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.openai_base_url)
    }

    /// Describe an image for a blind user
    ///
    /// # Arguments
    ///
    /// * `image` - raw image bytes
    /// * `mime_type` - MIME type of the image (e.g. `image/jpeg`)
    #[instrument(skip(self, image), fields(image_size = image.len(), mime_type))]
    pub async fn describe(&self, image: &[u8], mime_type: &str) -> Result<String, ProviderError> {
        debug!("Requesting image description");

        let data_url = format!("data:{mime_type};base64,{}", BASE64.encode(image));

        let request = VisionRequest {
            model: &self.config.vision_model,
            messages: [
                json!({
                    "role": "system",
                    "content": DESCRIBE_SYSTEM_PROMPT,
                }),
                json!({
                    "role": "user",
                    "content": [{
                        "type": "image_url",
                        "image_url": { "url": data_url },
                    }],
                }),
            ],
            max_tokens: 800,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(from_openai_failure(status, &error_body));
        }

        let body: VisionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let description = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                ProviderError::InvalidResponse("Response is missing message content".to_string())
            })?;

        debug!(description_len = description.len(), "Image description received");

        Ok(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> VisionClient {
        let config = ProviderConfig {
            openai_api_key: Some("test-api-key".to_string()),
            openai_base_url: mock_server.uri(),
            ..Default::default()
        };
        VisionClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn describe_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({"model": "gpt-4o"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": "A red bicycle leaning on a wall."}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.describe(&[0xFF, 0xD8, 0xFF], "image/jpeg").await;

        assert_eq!(result.unwrap(), "A red bicycle leaning on a wall.");
    }

    #[tokio::test]
    async fn describe_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.describe(&[1, 2, 3], "image/png").await;

        assert!(matches!(result, Err(ProviderError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn describe_missing_content_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.describe(&[1, 2, 3], "image/png").await;

        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }
}
