//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Maximum upload size for image and audio endpoints (10 MiB)
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        // Conversation endpoints
        .route("/chat", post(handlers::chat::chat))
        .route(
            "/analyze-environment",
            post(handlers::environment::analyze_environment),
        )
        // Vision and image endpoints
        .route(
            "/describe-image",
            post(handlers::describe_image::describe_image),
        )
        .route(
            "/generate-image",
            post(handlers::generate_image::generate_image),
        )
        .route(
            "/generate-image-fal",
            post(handlers::generate_image::generate_image_fal),
        )
        // Speech endpoints
        .route(
            "/speech-to-text",
            post(handlers::speech_to_text::speech_to_text),
        )
        .route(
            "/text-to-speech",
            post(handlers::text_to_speech::text_to_speech),
        )
        // Sign-language endpoints
        .route(
            "/generate-sign-language",
            post(handlers::sign_language::generate_sign_language),
        )
        .route(
            "/generate-sign-video",
            post(handlers::sign_language::generate_sign_video),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // Attach state
        .with_state(state)
}
