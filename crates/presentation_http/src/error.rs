//! API error handling
//!
//! Only three failure classes ever reach a caller: invalid input (400), a
//! hard missing-configuration case (503, image generation only), and
//! unexpected internal failures (500). Provider failures never appear here;
//! route handlers downgrade them to fallback responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed required input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Required provider credential is absent and the route has no fallback
    #[error("Service unavailable: {0}")]
    MissingConfiguration(String),

    /// Both image-generation tiers failed; no local substitute exists
    #[error("{message}")]
    GenerationFailed {
        /// User-facing error message
        message: String,
        /// Diagnostic detail
        details: String,
    },

    /// Unexpected internal failure
    #[error("Internal error: {message}")]
    Internal {
        /// User-facing error message
        message: String,
        /// Diagnostic detail, when available
        details: Option<String>,
    },
}

impl ApiError {
    /// Internal error for a rejected/unparsable request body
    pub fn bad_body(err: impl std::fmt::Display) -> Self {
        Self::Internal {
            message: "Failed to process request".to_string(),
            details: Some(err.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Set when the caller should expect degraded service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: msg,
                    details: None,
                    fallback: None,
                },
            ),
            Self::MissingConfiguration(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse {
                    error: msg,
                    details: None,
                    fallback: Some(true),
                },
            ),
            Self::GenerationFailed { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: message,
                    details: Some(details),
                    fallback: Some(true),
                },
            ),
            Self::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: message,
                    details,
                    fallback: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_message() {
        let err = ApiError::BadRequest("Message is required".to_string());
        assert_eq!(err.to_string(), "Bad request: Message is required");
    }

    #[test]
    fn missing_configuration_message() {
        let err = ApiError::MissingConfiguration("OpenAI API key not configured".to_string());
        assert_eq!(
            err.to_string(),
            "Service unavailable: OpenAI API key not configured"
        );
    }

    #[test]
    fn into_response_bad_request() {
        let err = ApiError::BadRequest("invalid".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn into_response_missing_configuration() {
        let err = ApiError::MissingConfiguration("no key".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn into_response_generation_failed() {
        let err = ApiError::GenerationFailed {
            message: "Failed to generate image".to_string(),
            details: "both tiers failed".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn into_response_internal() {
        let err = ApiError::bad_body("unexpected end of input");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_response_skips_absent_fields() {
        let body = ErrorResponse {
            error: "Bad request".to_string(),
            details: None,
            fallback: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("error"));
        assert!(!json.contains("details"));
        assert!(!json.contains("fallback"));
    }

    #[test]
    fn error_response_includes_fallback_flag() {
        let body = ErrorResponse {
            error: "OpenAI API key not configured".to_string(),
            details: None,
            fallback: Some(true),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"fallback\":true"));
    }
}
