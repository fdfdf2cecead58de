//! Provider configuration

use serde::{Deserialize, Serialize};

/// Configuration for the external AI providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// OpenAI API key (chat, vision, images, speech)
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// OpenAI API base URL (for custom endpoints)
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Fal.ai API key (Stable Diffusion image generation)
    #[serde(default)]
    pub fal_api_key: Option<String>,

    /// Fal.ai base URL
    #[serde(default = "default_fal_base_url")]
    pub fal_base_url: String,

    /// Chat completion model
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Vision model for image description
    #[serde(default = "default_vision_model")]
    pub vision_model: String,

    /// Primary image generation model
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Secondary image generation model, tried once when the primary fails
    #[serde(default = "default_image_fallback_model")]
    pub image_fallback_model: String,

    /// Speech-to-text model
    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    /// Text-to-speech model
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Default voice for TTS
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_fal_base_url() -> String {
    "https://fal.run".to_string()
}

fn default_chat_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_vision_model() -> String {
    "gpt-4o".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_fallback_model() -> String {
    "dall-e-2".to_string()
}

fn default_stt_model() -> String {
    "whisper-1".to_string()
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_voice() -> String {
    "alloy".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            fal_api_key: None,
            fal_base_url: default_fal_base_url(),
            chat_model: default_chat_model(),
            vision_model: default_vision_model(),
            image_model: default_image_model(),
            image_fallback_model: default_image_fallback_model(),
            stt_model: default_stt_model(),
            tts_model: default_tts_model(),
            default_voice: default_voice(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ProviderConfig {
    /// Create a minimal config for testing
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            openai_api_key: Some("test-api-key".to_string()),
            fal_api_key: Some("test-fal-key".to_string()),
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        if self.openai_base_url.is_empty() {
            return Err("OpenAI base URL must not be empty".to_string());
        }
        if self.fal_base_url.is_empty() {
            return Err("Fal base URL must not be empty".to_string());
        }
        Ok(())
    }

    /// Whether a usable OpenAI credential is configured.
    ///
    /// A key with the `AIza` prefix belongs to a different vendor and is
    /// treated as misconfiguration, so routes short-circuit to the local
    /// fallback instead of burning a doomed network call.
    pub fn has_openai_credentials(&self) -> bool {
        self.openai_api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty() && !key.starts_with("AIza"))
    }

    /// Whether a Fal.ai credential is configured
    pub fn has_fal_credentials(&self) -> bool {
        self.fal_api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = ProviderConfig::default();

        assert!(config.openai_api_key.is_none());
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.fal_base_url, "https://fal.run");
        assert_eq!(config.chat_model, "gpt-3.5-turbo");
        assert_eq!(config.vision_model, "gpt-4o");
        assert_eq!(config.image_model, "dall-e-3");
        assert_eq!(config.image_fallback_model, "dall-e-2");
        assert_eq!(config.stt_model, "whisper-1");
        assert_eq!(config.tts_model, "tts-1");
        assert_eq!(config.default_voice, "alloy");
        assert_eq!(config.timeout_ms, 30000);
    }

    #[test]
    fn default_config_has_no_credentials() {
        let config = ProviderConfig::default();
        assert!(!config.has_openai_credentials());
        assert!(!config.has_fal_credentials());
    }

    #[test]
    fn test_config_has_credentials() {
        let config = ProviderConfig::test();
        assert!(config.has_openai_credentials());
        assert!(config.has_fal_credentials());
    }

    #[test]
    fn wrong_vendor_prefix_is_not_a_credential() {
        let config = ProviderConfig {
            openai_api_key: Some("AIzaSyD-bogus".to_string()),
            ..Default::default()
        };
        assert!(!config.has_openai_credentials());
    }

    #[test]
    fn empty_key_is_not_a_credential() {
        let config = ProviderConfig {
            openai_api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.has_openai_credentials());
    }

    #[test]
    fn validate_succeeds_for_default() {
        assert!(ProviderConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_fails_with_zero_timeout() {
        let config = ProviderConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_deserializes_from_toml() {
        let toml = r#"
            openai_api_key = "sk-test"
            chat_model = "gpt-4o-mini"
            image_model = "dall-e-3"
            timeout_ms = 60000
        "#;

        let config: ProviderConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.openai_api_key, Some("sk-test".to_string()));
        assert_eq!(config.chat_model, "gpt-4o-mini");
        assert_eq!(config.timeout_ms, 60000);
        // Unspecified fields fall back to defaults
        assert_eq!(config.stt_model, "whisper-1");
        assert_eq!(config.default_voice, "alloy");
    }
}
