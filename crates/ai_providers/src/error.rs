//! Provider errors
//!
//! Every variant signals the same thing to a route handler: the provider
//! could not produce a usable result, and the local fallback should take
//! over. The split exists for diagnostics, not for control flow.

use thiserror::Error;

/// Errors that can occur when calling an external AI provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Failed to connect to the provider
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request reached the provider but failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Provider returned a response that does not match its schema
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request timed out
    #[error("Provider request timed out")]
    Timeout,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

/// OpenAI API error response body
#[derive(Debug, serde::Deserialize)]
pub(crate) struct OpenAiApiError {
    pub error: OpenAiApiErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct OpenAiApiErrorDetail {
    pub message: String,
    pub code: Option<String>,
}

/// Map a non-success OpenAI response to a [`ProviderError`].
///
/// Tries to parse the structured API error first; falls back to the raw
/// status and body when the error body itself is malformed.
pub(crate) fn from_openai_failure(status: reqwest::StatusCode, body: &str) -> ProviderError {
    if let Ok(api_error) = serde_json::from_str::<OpenAiApiError>(body) {
        return match api_error.error.code.as_deref() {
            Some("rate_limit_exceeded") => ProviderError::RateLimited,
            _ => ProviderError::RequestFailed(api_error.error.message),
        };
    }

    ProviderError::RequestFailed(format!("HTTP {status}: {body}"))
}
