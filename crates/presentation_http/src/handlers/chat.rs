//! Chat handler

use ai_providers::Usage;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::{error::ApiError, state::AppState};

use super::common::{Source, UNAVAILABLE_NOTE};

/// System prompt used when the caller does not supply a context
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant for users with \
     disabilities. You are empathetic, supportive, and provide accurate information. You can:\n\
     - Describe environments and sounds\n\
     - Answer questions about time, date, weather\n\
     - Help with calculations and general knowledge\n\
     - Provide emotional support and encouragement\n\
     - Assist with daily tasks and accessibility needs\n\n\
     Always be conversational, supportive, and helpful. Keep responses concise but informative.";

const MAX_TOKENS: u32 = 500;

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User message
    pub message: String,
    /// Optional system context override
    #[serde(default)]
    pub context: Option<String>,
}

/// Chat response body
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Assistant reply
    pub response: String,
    /// How the reply was produced
    pub source: Source,
    /// Token usage, when the provider reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Degradation note for the fallback-after-error path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Handle a chat request
#[instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(ApiError::bad_body)?;

    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }

    if !state.config.providers.has_openai_credentials() {
        return Ok(Json(ChatResponse {
            response: fallback::chat_reply(&request.message),
            source: Source::Fallback,
            usage: None,
            error: None,
        }));
    }

    let system = request.context.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT);

    match state.chat.complete(system, &request.message, MAX_TOKENS).await {
        Ok(completion) => Ok(Json(ChatResponse {
            response: completion.content,
            source: Source::OpenAi,
            usage: completion.usage,
            error: None,
        })),
        Err(err) => {
            warn!(error = %err, "Chat provider failed, using fallback response");
            Ok(Json(ChatResponse {
                response: fallback::chat_reply(&request.message),
                source: Source::FallbackAfterError,
                usage: None,
                error: Some(UNAVAILABLE_NOTE.to_string()),
            }))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_deserialize() {
        let json = r#"{"message": "Hello"}"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.message, "Hello");
        assert!(request.context.is_none());
    }

    #[test]
    fn chat_request_with_context() {
        let json = r#"{"message": "Hi", "context": "You are terse."}"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.context, Some("You are terse.".to_string()));
    }

    #[test]
    fn chat_response_skips_absent_fields() {
        let response = ChatResponse {
            response: "Hello there".to_string(),
            source: Source::Fallback,
            usage: None,
            error: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"source\":\"fallback\""));
        assert!(!json.contains("usage"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn chat_response_carries_degradation_note() {
        let response = ChatResponse {
            response: "canned".to_string(),
            source: Source::FallbackAfterError,
            usage: None,
            error: Some(UNAVAILABLE_NOTE.to_string()),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("fallback_after_error"));
        assert!(json.contains(UNAVAILABLE_NOTE));
    }
}
