//! SensAble HTTP presentation layer
//!
//! Exposes the accessibility endpoints over HTTP. Every provider-backed
//! route follows the same contract: validate the input, check the provider
//! credential, try the provider once, and degrade to a local fallback with
//! an honest `source` tag instead of surfacing a hard failure.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{AppConfig, ServerConfig};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
