//! Image description handler

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::{error::ApiError, state::AppState};

use super::common::Source;

const VISION_UNAVAILABLE_NOTE: &str = " (Note: AI vision service temporarily unavailable)";

/// Image description response body
#[derive(Debug, Serialize)]
pub struct DescribeImageResponse {
    /// Description text
    pub description: String,
    /// How the description was produced
    pub source: Source,
}

struct UploadedImage {
    data: Vec<u8>,
    filename: String,
    content_type: String,
}

async fn read_image_field(mut multipart: Multipart) -> Result<Option<UploadedImage>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|err| ApiError::BadRequest(err.to_string()))?
            .to_vec();
        return Ok(Some(UploadedImage {
            data,
            filename,
            content_type,
        }));
    }
    Ok(None)
}

/// Handle an image description upload
#[instrument(skip(state, multipart))]
pub async fn describe_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DescribeImageResponse>, ApiError> {
    let Some(image) = read_image_field(multipart).await? else {
        return Err(ApiError::BadRequest("No image file provided.".to_string()));
    };

    if image.data.is_empty() || !image.content_type.starts_with("image/") {
        return Err(ApiError::BadRequest(
            "Please upload a valid image file.".to_string(),
        ));
    }

    if !state.config.providers.has_openai_credentials() {
        return Ok(Json(DescribeImageResponse {
            description: fallback::description_for(&image.filename, image.data.len() as u64),
            source: Source::Fallback,
        }));
    }

    match state
        .vision
        .describe(&image.data, &image.content_type)
        .await
    {
        Ok(description) => Ok(Json(DescribeImageResponse {
            description,
            source: Source::OpenAi,
        })),
        Err(err) => {
            warn!(error = %err, "Vision provider failed, using local description");
            let mut description =
                fallback::description_for(&image.filename, image.data.len() as u64);
            description.push_str(VISION_UNAVAILABLE_NOTE);
            Ok(Json(DescribeImageResponse {
                description,
                source: Source::FallbackAfterError,
            }))
        },
    }
}
