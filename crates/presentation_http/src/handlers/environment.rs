//! Environment analysis handler

use ai_providers::Usage;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::{error::ApiError, state::AppState};

use super::common::{Source, UNAVAILABLE_NOTE};

const MAX_TOKENS: u32 = 400;

const SOUNDS_PROMPT: &str = "You are an AI assistant that can analyze environmental sounds. \
     Describe the acoustic environment in detail, including background noise, conversations, \
     mechanical sounds, and overall ambiance. Be specific and helpful for someone who cannot \
     see.";

const PEOPLE_PROMPT: &str = "You are an AI assistant that can sense people and activity in an \
     environment. Describe how many people are around, what they're doing, their general mood \
     and energy level, and the social atmosphere.";

const SAFETY_PROMPT: &str = "You are an AI assistant focused on environmental safety. Analyze \
     potential hazards, safe pathways, emergency exits, and general safety considerations for \
     someone with disabilities.";

const NAVIGATION_PROMPT: &str = "You are an AI assistant that helps with navigation and spatial \
     awareness. Describe the layout, obstacles, pathways, and important landmarks or reference \
     points.";

const GENERAL_PROMPT: &str = "You are an AI assistant that provides comprehensive environmental \
     analysis. Describe the overall environment including sounds, people, safety, and \
     navigation aspects for someone who needs detailed environmental awareness.";

fn system_prompt(request_type: &str) -> &'static str {
    match request_type {
        "sounds" => SOUNDS_PROMPT,
        "people" => PEOPLE_PROMPT,
        "safety" => SAFETY_PROMPT,
        "navigation" => NAVIGATION_PROMPT,
        _ => GENERAL_PROMPT,
    }
}

fn default_request_type() -> String {
    "general".to_string()
}

/// Environment analysis request body
#[derive(Debug, Deserialize)]
pub struct EnvironmentRequest {
    /// Free-form description of the user's situation
    #[serde(default)]
    pub context: Option<String>,
    /// Analysis flavour: sounds, people, safety, navigation or general
    #[serde(rename = "requestType", default = "default_request_type")]
    pub request_type: String,
}

/// Environment analysis response body
#[derive(Debug, Serialize)]
pub struct EnvironmentResponse {
    /// Analysis text
    pub analysis: String,
    /// How the analysis was produced
    pub source: Source,
    /// Echo of the requested analysis flavour
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Handle an environment analysis request
#[instrument(skip(state, payload))]
pub async fn analyze_environment(
    State(state): State<AppState>,
    payload: Result<Json<EnvironmentRequest>, JsonRejection>,
) -> Result<Json<EnvironmentResponse>, ApiError> {
    let Json(request) = payload.map_err(ApiError::bad_body)?;

    if !state.config.providers.has_openai_credentials() {
        return Ok(Json(EnvironmentResponse {
            analysis: fallback::analysis_for(&request.request_type).to_string(),
            source: Source::Fallback,
            request_type: request.request_type,
            usage: None,
            error: None,
        }));
    }

    let user_message = request.context.clone().unwrap_or_else(|| {
        format!(
            "Please analyze the current environment and provide a detailed description \
             focusing on {} aspects.",
            request.request_type
        )
    });

    let system = system_prompt(&request.request_type);

    match state.chat.complete(system, &user_message, MAX_TOKENS).await {
        Ok(completion) => Ok(Json(EnvironmentResponse {
            analysis: completion.content,
            source: Source::OpenAi,
            request_type: request.request_type,
            usage: completion.usage,
            error: None,
        })),
        Err(err) => {
            warn!(error = %err, "Environment provider failed, using canned analysis");
            Ok(Json(EnvironmentResponse {
                analysis: fallback::analysis_for(&request.request_type).to_string(),
                source: Source::FallbackAfterError,
                request_type: request.request_type,
                usage: None,
                error: Some(UNAVAILABLE_NOTE.to_string()),
            }))
        },
    }
}
