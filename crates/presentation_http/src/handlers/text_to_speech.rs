//! Text-to-speech handler
//!
//! The fallback path here has a different shape from the success path: the
//! server cannot synthesize audio locally, so it returns instructions for
//! the client to use its own speech engine instead.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::{error::ApiError, state::AppState};

use super::common::Source;

const DEFAULT_SPEED: f64 = 1.0;

const BROWSER_TTS_MESSAGE: &str = "Please use your browser's built-in text-to-speech feature. \
     The text has been prepared for you.";

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

/// Synthesis request body
#[derive(Debug, Deserialize)]
pub struct TextToSpeechRequest {
    /// Text to synthesize
    pub text: String,
    /// Voice name, defaults to the configured voice
    #[serde(default)]
    pub voice: Option<String>,
    /// Playback speed multiplier
    #[serde(default = "default_speed")]
    pub speed: f64,
}

/// Synthesis response: either provider audio or browser instructions
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TextToSpeechResponse {
    Audio(SynthesizedAudio),
    BrowserFallback(BrowserFallback),
}

/// Provider-synthesized audio as a data URL
#[derive(Debug, Serialize)]
pub struct SynthesizedAudio {
    /// Base64 data URL carrying the mp3 bytes
    #[serde(rename = "audioData")]
    pub audio_data: String,
    pub voice: String,
    pub speed: f64,
    pub text: String,
    pub source: Source,
}

/// Instructions for the client to synthesize locally
#[derive(Debug, Serialize)]
pub struct BrowserFallback {
    pub error: String,
    pub fallback: bool,
    pub instructions: BrowserInstructions,
    pub source: Source,
}

/// What the client should feed its own speech engine
#[derive(Debug, Serialize)]
pub struct BrowserInstructions {
    pub text: String,
    pub voice: String,
    pub speed: f64,
    pub message: String,
}

fn browser_fallback(text: String, voice: String, speed: f64, source: Source) -> BrowserFallback {
    BrowserFallback {
        error: "OpenAI API not available".to_string(),
        fallback: true,
        instructions: BrowserInstructions {
            text,
            voice,
            speed,
            message: BROWSER_TTS_MESSAGE.to_string(),
        },
        source,
    }
}

/// Handle a speech synthesis request
#[instrument(skip(state, payload))]
pub async fn text_to_speech(
    State(state): State<AppState>,
    payload: Result<Json<TextToSpeechRequest>, JsonRejection>,
) -> Result<Json<TextToSpeechResponse>, ApiError> {
    let Json(request) = payload.map_err(ApiError::bad_body)?;

    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text is required".to_string()));
    }

    let voice = request
        .voice
        .clone()
        .unwrap_or_else(|| state.config.providers.default_voice.clone());

    if !state.config.providers.has_openai_credentials() {
        return Ok(Json(TextToSpeechResponse::BrowserFallback(
            browser_fallback(request.text, voice, request.speed, Source::Fallback),
        )));
    }

    #[allow(clippy::cast_possible_truncation)]
    let speed = request.speed as f32;

    match state.speech.synthesize(&request.text, &voice, speed).await {
        Ok(audio) => {
            let encoded = BASE64.encode(&audio);
            Ok(Json(TextToSpeechResponse::Audio(SynthesizedAudio {
                audio_data: format!("data:audio/mp3;base64,{encoded}"),
                voice,
                speed: request.speed,
                text: request.text,
                source: Source::OpenAi,
            })))
        },
        Err(err) => {
            warn!(error = %err, "Speech synthesis failed, returning browser instructions");
            Ok(Json(TextToSpeechResponse::BrowserFallback(
                browser_fallback(
                    request.text,
                    voice,
                    request.speed,
                    Source::FallbackAfterError,
                ),
            )))
        },
    }
}
