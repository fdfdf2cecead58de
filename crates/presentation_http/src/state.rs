//! Application state shared across handlers

use std::sync::Arc;

use ai_providers::{
    ChatClient, FalImageClient, ImageClient, ProviderError, SpeechClient, VisionClient,
};

use crate::config::AppConfig;

/// Shared application state
///
/// Clients share `reqwest` connection pools and are cheap to clone. They
/// are constructed regardless of whether a credential is configured - the
/// per-request ConfigCheck decides whether they are ever called.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Chat completion client
    pub chat: ChatClient,
    /// Vision description client
    pub vision: VisionClient,
    /// DALL-E image generation client
    pub image: ImageClient,
    /// Fal.ai image generation client
    pub fal: FalImageClient,
    /// Speech (STT/TTS) client
    pub speech: SpeechClient,
}

impl AppState {
    /// Build the application state from configuration
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Configuration` if any client cannot be built.
    pub fn new(config: AppConfig) -> Result<Self, ProviderError> {
        let providers = config.providers.clone();

        Ok(Self {
            config: Arc::new(config),
            chat: ChatClient::new(providers.clone())?,
            vision: VisionClient::new(providers.clone())?,
            image: ImageClient::new(providers.clone())?,
            fal: FalImageClient::new(providers.clone())?,
            speech: SpeechClient::new(providers)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_builds_without_credentials() {
        let state = AppState::new(AppConfig::default());
        assert!(state.is_ok());
    }

    #[test]
    fn state_build_fails_with_invalid_config() {
        let mut config = AppConfig::default();
        config.providers.timeout_ms = 0;
        assert!(AppState::new(config).is_err());
    }
}
