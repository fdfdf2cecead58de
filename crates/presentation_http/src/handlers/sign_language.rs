//! Sign-language handlers
//!
//! Gloss translation and the placeholder video route. Both are local-only;
//! no provider is involved.

use axum::{Json, extract::rejection::JsonRejection};
use fallback::SignTranslation;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;

const VIDEO_DURATION: &str = "5 seconds";

fn default_language() -> String {
    "en".to_string()
}

/// Gloss translation request body
#[derive(Debug, Deserialize)]
pub struct SignLanguageRequest {
    /// Text to translate into gloss
    pub text: String,
    /// Source language hint
    #[serde(default = "default_language")]
    pub language: String,
}

/// Handle a sign-language gloss translation request
#[instrument(skip(payload))]
pub async fn generate_sign_language(
    payload: Result<Json<SignLanguageRequest>, JsonRejection>,
) -> Result<Json<SignTranslation>, ApiError> {
    let Json(request) = payload.map_err(ApiError::bad_body)?;

    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text is required".to_string()));
    }

    Ok(Json(fallback::translate(&request.text, &request.language)))
}

/// Sign video request body
#[derive(Debug, Deserialize)]
pub struct SignVideoRequest {
    /// Text the video should sign
    pub text: String,
}

/// Sign video response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignVideoResponse {
    /// Placeholder video URL with the text encoded as a query parameter
    pub video_url: String,
    /// Echo of the requested text
    pub text: String,
    /// Fixed placeholder duration
    pub duration: String,
}

/// Handle a sign-language video request
#[instrument(skip(payload))]
pub async fn generate_sign_video(
    payload: Result<Json<SignVideoRequest>, JsonRejection>,
) -> Result<Json<SignVideoResponse>, ApiError> {
    let Json(request) = payload.map_err(ApiError::bad_body)?;

    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text is required".to_string()));
    }

    let video_url = format!(
        "/placeholder-sign-video.mp4?text={}",
        urlencoding::encode(&request.text)
    );

    Ok(Json(SignVideoResponse {
        video_url,
        text: request.text,
        duration: VIDEO_DURATION.to_string(),
    }))
}
