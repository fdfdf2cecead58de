//! Image generation handlers
//!
//! Two routes share this module: the DALL-E route with its bounded
//! secondary-model retry, and the Fal.ai Stable Diffusion route. Neither
//! has a local fallback; without a usable provider they fail loudly.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::{error::ApiError, state::AppState};

fn default_size() -> String {
    "1024x1024".to_string()
}

/// DALL-E generation request body
#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    /// Image prompt
    pub prompt: String,
    /// Requested dimensions, e.g. "1024x1024"
    #[serde(default = "default_size")]
    pub size: String,
}

/// DALL-E generation response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    /// Hosted URL of the generated image
    pub image_url: String,
    /// Model that produced the image
    pub model: String,
    /// Prompt as sent to the provider
    pub prompt: String,
    /// Present and true only when the secondary model produced the image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
}

/// Handle a DALL-E image generation request
#[instrument(skip(state, payload))]
pub async fn generate_image(
    State(state): State<AppState>,
    payload: Result<Json<GenerateImageRequest>, JsonRejection>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let Json(request) = payload.map_err(ApiError::bad_body)?;

    if request.prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("Prompt is required".to_string()));
    }

    if !state.config.providers.has_openai_credentials() {
        return Err(ApiError::MissingConfiguration(
            "OpenAI API key not configured".to_string(),
        ));
    }

    match state.image.generate(&request.prompt, &request.size).await {
        Ok(image) => Ok(Json(GenerateImageResponse {
            image_url: image.url,
            model: image.model,
            prompt: image.prompt,
            fallback: image.used_secondary_model.then_some(true),
        })),
        Err(err) => {
            warn!(error = %err, "Image generation failed on both models");
            Err(ApiError::GenerationFailed {
                message: "Failed to generate image".to_string(),
                details: err.to_string(),
            })
        },
    }
}

/// Fal.ai generation request body
#[derive(Debug, Deserialize)]
pub struct GenerateImageFalRequest {
    /// Image prompt
    pub prompt: String,
}

/// Fal.ai generation response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageFalResponse {
    /// Hosted URL of the generated image
    pub image_url: String,
    /// Model label for the client
    pub model: String,
    /// Prompt as sent to the provider
    pub prompt: String,
}

/// Handle a Stable Diffusion image generation request via Fal.ai
#[instrument(skip(state, payload))]
pub async fn generate_image_fal(
    State(state): State<AppState>,
    payload: Result<Json<GenerateImageFalRequest>, JsonRejection>,
) -> Result<Json<GenerateImageFalResponse>, ApiError> {
    let Json(request) = payload.map_err(ApiError::bad_body)?;

    if request.prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("Prompt is required".to_string()));
    }

    if !state.config.providers.has_fal_credentials() {
        return Err(ApiError::MissingConfiguration(
            "Fal API key not configured".to_string(),
        ));
    }

    match state.fal.generate(&request.prompt).await {
        Ok(url) => Ok(Json(GenerateImageFalResponse {
            image_url: url,
            model: "stable-diffusion-xl".to_string(),
            prompt: request.prompt,
        })),
        Err(err) => {
            warn!(error = %err, "Fal.ai generation failed");
            Err(ApiError::GenerationFailed {
                message: "Failed to generate image with Stable Diffusion".to_string(),
                details: err.to_string(),
            })
        },
    }
}
