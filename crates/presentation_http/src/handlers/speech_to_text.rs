//! Speech-to-text handler

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::{error::ApiError, state::AppState};

use super::common::Source;

const TRANSCRIPTION_UNAVAILABLE_NOTE: &str =
    " (Note: AI transcription service temporarily unavailable)";

const DEFAULT_LANGUAGE: &str = "en";

/// Transcription response body
#[derive(Debug, Serialize)]
pub struct SpeechToTextResponse {
    /// Transcribed (or simulated) text
    pub text: String,
    /// Language the transcription was requested in
    pub language: String,
    /// Audio duration in seconds, when known or estimated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// How the transcription was produced
    pub source: Source,
}

struct UploadedAudio {
    data: Vec<u8>,
    filename: String,
    content_type: String,
}

struct TranscribeUpload {
    audio: Option<UploadedAudio>,
    language: String,
}

async fn read_upload(mut multipart: Multipart) -> Result<TranscribeUpload, ApiError> {
    let mut audio = None;
    let mut language = DEFAULT_LANGUAGE.to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?
    {
        match field.name() {
            Some("audio") => {
                let filename = field.file_name().unwrap_or("recording").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|err| ApiError::BadRequest(err.to_string()))?
                    .to_vec();
                audio = Some(UploadedAudio {
                    data,
                    filename,
                    content_type,
                });
            },
            Some("language") => {
                let value = field
                    .text()
                    .await
                    .map_err(|err| ApiError::BadRequest(err.to_string()))?;
                if !value.trim().is_empty() {
                    language = value;
                }
            },
            _ => {},
        }
    }

    Ok(TranscribeUpload { audio, language })
}

/// Handle a transcription upload
#[instrument(skip(state, multipart))]
pub async fn speech_to_text(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SpeechToTextResponse>, ApiError> {
    let upload = read_upload(multipart).await?;

    let Some(audio) = upload.audio else {
        return Err(ApiError::BadRequest("Audio file is required".to_string()));
    };

    if audio.data.is_empty() || !audio.content_type.starts_with("audio/") {
        return Err(ApiError::BadRequest(
            "Please upload a valid audio file.".to_string(),
        ));
    }

    let size = audio.data.len() as u64;
    #[allow(clippy::cast_precision_loss)]
    let estimated_duration = fallback::estimated_duration_secs(size) as f64;

    if !state.config.providers.has_openai_credentials() {
        return Ok(Json(SpeechToTextResponse {
            text: fallback::transcription_for(size),
            language: upload.language,
            duration: Some(estimated_duration),
            source: Source::Fallback,
        }));
    }

    match state
        .speech
        .transcribe(
            audio.data,
            audio.filename,
            &audio.content_type,
            &upload.language,
        )
        .await
    {
        Ok(transcription) => Ok(Json(SpeechToTextResponse {
            text: transcription.text,
            language: upload.language,
            duration: transcription.duration_secs,
            source: Source::OpenAi,
        })),
        Err(err) => {
            warn!(error = %err, "Transcription provider failed, using simulated transcript");
            let mut text = fallback::transcription_for(size);
            text.push_str(TRANSCRIPTION_UNAVAILABLE_NOTE);
            Ok(Json(SpeechToTextResponse {
                text,
                language: upload.language,
                duration: Some(estimated_duration),
                source: Source::FallbackAfterError,
            }))
        },
    }
}
