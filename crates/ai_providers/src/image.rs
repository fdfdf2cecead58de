//! Image generation clients
//!
//! Two providers back the image endpoints:
//!
//! - [`ImageClient`] - OpenAI DALL-E with a bounded two-tier attempt: the
//!   primary model first, then exactly one attempt against the cheaper
//!   secondary model with its tighter prompt/size constraints. This is a
//!   deliberate two-step sequence, not a transient-fault retry loop.
//! - [`FalImageClient`] - Fal.ai Stable Diffusion XL.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::ProviderConfig;
use crate::error::{ProviderError, from_openai_failure};

/// Prompt preamble applied before sending to DALL-E
const ENHANCE_PREFIX: &str = "High quality, detailed, photorealistic image of ";
const ENHANCE_SUFFIX: &str =
    ". Professional photography style, good lighting, clear details, vibrant colors.";

/// Quality tag appended for Stable Diffusion prompts
const SDXL_SUFFIX: &str =
    ", high quality, detailed, photorealistic, professional photography, 8k resolution, masterpiece";

/// Secondary model prompt limit (DALL-E 2)
const SECONDARY_PROMPT_LIMIT: usize = 1000;

/// A generated image
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// URL of the generated image
    pub url: String,
    /// Model that produced it
    pub model: String,
    /// The prompt as sent to the provider (after enhancement)
    pub prompt: String,
    /// Whether the secondary model produced the image
    pub used_secondary_model: bool,
}

/// Client for OpenAI image generation
#[derive(Debug, Clone)]
pub struct ImageClient {
    client: Client,
    config: ProviderConfig,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<&'a str>,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedEntry>,
}

#[derive(Debug, Deserialize)]
struct GeneratedEntry {
    url: String,
}

impl ImageClient {
    /// Create a new image generation client
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

    fn generations_url(&self) -> String {
        format!("{}/images/generations", self.config.openai_base_url)
    }

    /// Generate an image, trying the primary model then the secondary once
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len(), size))]
    pub async fn generate(
        &self,
        prompt: &str,
        size: &str,
    ) -> Result<GeneratedImage, ProviderError> {
        let enhanced = format!("{ENHANCE_PREFIX}{prompt}{ENHANCE_SUFFIX}");

        match self.attempt(&self.config.image_model, &enhanced, size, Some("standard")).await {
            Ok(url) => Ok(GeneratedImage {
                url,
                model: self.config.image_model.clone(),
                prompt: enhanced,
                used_secondary_model: false,
            }),
            Err(primary_err) => {
                warn!(
                    model = %self.config.image_model,
                    error = %primary_err,
                    "Primary image model failed, trying secondary model"
                );

                // The secondary model has a shorter prompt limit and only
                // supports smaller sizes.
                let truncated: String = enhanced.chars().take(SECONDARY_PROMPT_LIMIT).collect();
                let url = self
                    .attempt(&self.config.image_fallback_model, &truncated, "512x512", None)
                    .await
                    .map_err(|secondary_err| {
                        warn!(
                            model = %self.config.image_fallback_model,
                            error = %secondary_err,
                            "Secondary image model also failed"
                        );
                        secondary_err
                    })?;

                Ok(GeneratedImage {
                    url,
                    model: self.config.image_fallback_model.clone(),
                    prompt: enhanced,
                    used_secondary_model: true,
                })
            },
        }
    }

    async fn attempt(
        &self,
        model: &str,
        prompt: &str,
        size: &str,
        quality: Option<&str>,
    ) -> Result<String, ProviderError> {
        debug!(model, size, "Requesting image generation");

        let request = GenerationRequest {
            model,
            prompt,
            n: 1,
            size,
            quality,
            response_format: "url",
        };

        let response = self
            .client
            .post(self.generations_url())
            .bearer_auth(self.api_key())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(from_openai_failure(status, &error_body));
        }

        let body: GenerationResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        body.data.into_iter().next().map(|e| e.url).ok_or_else(|| {
            ProviderError::InvalidResponse("Response contains no generated images".to_string())
        })
    }
}

/// Client for Fal.ai Stable Diffusion XL
#[derive(Debug, Clone)]
pub struct FalImageClient {
    client: Client,
    config: ProviderConfig,
}

#[derive(Debug, Serialize)]
struct SdxlRequest<'a> {
    prompt: &'a str,
    image_size: &'a str,
    num_inference_steps: u8,
    guidance_scale: f32,
    num_images: u8,
    enable_safety_checker: bool,
}

#[derive(Debug, Deserialize)]
struct SdxlResponse {
    #[serde(default)]
    images: Vec<SdxlImage>,
}

#[derive(Debug, Deserialize)]
struct SdxlImage {
    url: String,
}

impl FalImageClient {
    /// Create a new Fal.ai client
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
        self.config.fal_api_key.as_deref().unwrap_or_default()
    }

    fn sdxl_url(&self) -> String {
        format!("{}/fal-ai/fast-sdxl", self.config.fal_base_url)
    }

    /// Generate an image with Stable Diffusion XL, returning its URL
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        debug!("Requesting SDXL image generation");

        let enhanced = format!("{prompt}{SDXL_SUFFIX}");

        let request = SdxlRequest {
            prompt: &enhanced,
            image_size: "square_hd",
            num_inference_steps: 25,
            guidance_scale: 7.5,
            num_images: 1,
            enable_safety_checker: true,
        };

        let response = self
            .client
            .post(self.sdxl_url())
            .header("Authorization", format!("Key {}", self.api_key()))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ProviderError::RequestFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let body: SdxlResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        body.images.into_iter().next().map(|i| i.url).ok_or_else(|| {
            ProviderError::InvalidResponse("Response contains no generated images".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> ImageClient {
        let config = ProviderConfig {
            openai_api_key: Some("test-api-key".to_string()),
            openai_base_url: mock_server.uri(),
            ..Default::default()
        };
        ImageClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn generate_primary_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .and(body_partial_json(serde_json::json!({"model": "dall-e-3", "size": "1024x1024"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"url": "https://img.example/one.png"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let image = client.generate("a lighthouse", "1024x1024").await.unwrap();

        assert_eq!(image.url, "https://img.example/one.png");
        assert_eq!(image.model, "dall-e-3");
        assert!(!image.used_secondary_model);
        assert!(image.prompt.contains("a lighthouse"));
    }

    #[tokio::test]
    async fn generate_falls_back_to_secondary_model() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .and(body_partial_json(serde_json::json!({"model": "dall-e-3"})))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"message": "content policy", "code": "content_policy_violation"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .and(body_partial_json(serde_json::json!({"model": "dall-e-2", "size": "512x512"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"url": "https://img.example/two.png"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let image = client.generate("a lighthouse", "1024x1024").await.unwrap();

        assert_eq!(image.url, "https://img.example/two.png");
        assert_eq!(image.model, "dall-e-2");
        assert!(image.used_secondary_model);
    }

    #[tokio::test]
    async fn generate_fails_when_both_tiers_fail() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.generate("a lighthouse", "1024x1024").await;

        assert!(matches!(result, Err(ProviderError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn fal_generate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/fal-ai/fast-sdxl"))
            .and(header("authorization", "Key test-fal-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "images": [{"url": "https://fal.example/sdxl.png"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = ProviderConfig {
            fal_api_key: Some("test-fal-key".to_string()),
            fal_base_url: mock_server.uri(),
            ..Default::default()
        };
        let client = FalImageClient::new(config).unwrap();

        let url = client.generate("a lighthouse").await.unwrap();
        assert_eq!(url, "https://fal.example/sdxl.png");
    }

    #[tokio::test]
    async fn fal_generate_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/fal-ai/fast-sdxl"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = ProviderConfig {
            fal_api_key: Some("test-fal-key".to_string()),
            fal_base_url: mock_server.uri(),
            ..Default::default()
        };
        let client = FalImageClient::new(config).unwrap();

        assert!(matches!(
            client.generate("x").await,
            Err(ProviderError::RequestFailed(_))
        ));
    }

    #[tokio::test]
    async fn fal_empty_images_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/fal-ai/fast-sdxl"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "images": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = ProviderConfig {
            fal_api_key: Some("test-fal-key".to_string()),
            fal_base_url: mock_server.uri(),
            ..Default::default()
        };
        let client = FalImageClient::new(config).unwrap();

        assert!(matches!(
            client.generate("x").await,
            Err(ProviderError::InvalidResponse(_))
        ));
    }
}
