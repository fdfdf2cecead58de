//! Health and readiness probes

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Health probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness probe response
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub openai_configured: bool,
    pub fal_configured: bool,
}

/// Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness probe reporting which providers have credentials.
///
/// Reports configuration only; no provider calls are made.
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    Json(ReadyResponse {
        status: "ready",
        openai_configured: state.config.providers.has_openai_credentials(),
        fal_configured: state.config.providers.has_fal_credentials(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_ok() {
        let response = health().await;
        assert_eq!(response.status, "ok");
        assert!(!response.version.is_empty());
    }
}
