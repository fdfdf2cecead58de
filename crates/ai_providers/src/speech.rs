//! OpenAI speech client
//!
//! Whisper transcription (multipart upload) and TTS synthesis (raw audio
//! bytes back) for the `/speech-to-text` and `/text-to-speech` endpoints.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::ProviderConfig;
use crate::error::{ProviderError, from_openai_failure};

/// OpenAI TTS text length limit
const TTS_MAX_CHARS: usize = 4096;

/// Client for speech-to-text and text-to-speech
#[derive(Debug, Clone)]
pub struct SpeechClient {
    client: Client,
    config: ProviderConfig,
}

/// A transcription returned by Whisper
#[derive(Debug, Clone)]
pub struct Transcription {
    /// Transcribed text
    pub text: String,
    /// Audio duration in seconds, when the provider reports it
    pub duration_secs: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WhisperResponse {
    text: String,
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    speed: f32,
    response_format: &'a str,
}

impl SpeechClient {
    /// Create a new speech client
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

    fn stt_url(&self) -> String {
        format!("{}/audio/transcriptions", self.config.openai_base_url)
    }

    fn tts_url(&self) -> String {
        format!("{}/audio/speech", self.config.openai_base_url)
    }

    /// Transcribe audio to text with a language hint
    #[instrument(skip(self, audio), fields(audio_size = audio.len(), language))]
    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        filename: String,
        mime_type: &str,
        language: &str,
    ) -> Result<Transcription, ProviderError> {
        debug!("Transcribing audio with Whisper");

        if audio.is_empty() {
            return Err(ProviderError::RequestFailed(
                "Audio data is empty".to_string(),
            ));
        }

        let file_part = Part::bytes(audio)
            .file_name(filename)
            .mime_str(mime_type)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid MIME type: {e}")))?;

        let form = Form::new()
            .part("file", file_part)
            .text("model", self.config.stt_model.clone())
            .text("language", language.to_string())
            .text("response_format", "json");

        let response = self
            .client
            .post(self.stt_url())
            .bearer_auth(self.api_key())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(from_openai_failure(status, &error_body));
        }

        let body: WhisperResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        debug!(text_len = body.text.len(), "Transcription complete");

        Ok(Transcription {
            text: body.text,
            duration_secs: body.duration,
        })
    }

    /// Synthesize speech, returning MP3 audio bytes
    #[instrument(skip(self, text), fields(text_len = text.len(), voice, speed))]
    pub async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        speed: f32,
    ) -> Result<Bytes, ProviderError> {
        debug!("Synthesizing speech with OpenAI TTS");

        if text.is_empty() {
            return Err(ProviderError::RequestFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        if text.len() > TTS_MAX_CHARS {
            return Err(ProviderError::RequestFailed(format!(
                "Text too long: {} characters exceeds {TTS_MAX_CHARS} limit",
                text.len()
            )));
        }

        let request = TtsRequest {
            model: &self.config.tts_model,
            input: text,
            voice,
            speed,
            response_format: "mp3",
        };

        let response = self
            .client
            .post(self.tts_url())
            .bearer_auth(self.api_key())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(from_openai_failure(status, &error_body));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        debug!(audio_size = audio.len(), "Speech synthesis complete");

        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> SpeechClient {
        let config = ProviderConfig {
            openai_api_key: Some("test-api-key".to_string()),
            openai_base_url: mock_server.uri(),
            ..Default::default()
        };
        SpeechClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn transcribe_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .and(header("authorization", "Bearer test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "text": "Hello, world!",
                "duration": 2.5
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client
            .transcribe(vec![0, 1, 2, 3], "clip.webm".to_string(), "audio/webm", "en")
            .await;

        let transcription = result.unwrap();
        assert_eq!(transcription.text, "Hello, world!");
        assert_eq!(transcription.duration_secs, Some(2.5));
    }

    #[tokio::test]
    async fn transcribe_empty_audio_fails_locally() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server);

        let result = client
            .transcribe(vec![], "clip.webm".to_string(), "audio/webm", "en")
            .await;

        assert!(matches!(result, Err(ProviderError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn transcribe_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {
                    "message": "Rate limit exceeded",
                    "code": "rate_limit_exceeded"
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client
            .transcribe(vec![1, 2, 3], "clip.mp3".to_string(), "audio/mpeg", "en")
            .await;

        assert!(matches!(result, Err(ProviderError::RateLimited)));
    }

    #[tokio::test]
    async fn synthesize_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .and(header("authorization", "Bearer test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 1024]))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.synthesize("Hello, world!", "alloy", 1.0).await;

        assert_eq!(result.unwrap().len(), 1024);
    }

    #[tokio::test]
    async fn synthesize_empty_text_fails() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server);

        let result = client.synthesize("", "alloy", 1.0).await;

        assert!(matches!(result, Err(ProviderError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn synthesize_text_too_long_fails() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server);

        let long_text = "a".repeat(5000);
        let result = client.synthesize(&long_text, "alloy", 1.0).await;

        assert!(matches!(result, Err(ProviderError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn synthesize_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.synthesize("Hi", "alloy", 1.0).await;

        assert!(matches!(result, Err(ProviderError::RequestFailed(_))));
    }
}
