//! Application configuration

use ai_providers::ProviderConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// External provider configuration
    #[serde(default)]
    pub providers: ProviderConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = allow all)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// Reads an optional `config.toml`, then applies `SENSABLE_`-prefixed
    /// environment overrides, then the bare `OPENAI_API_KEY` / `FAL_KEY`
    /// variables that deployments conventionally set.
    ///
    /// # Errors
    ///
    /// Returns `config::ConfigError` if a source cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("SENSABLE")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut app_config: Self = builder.build()?.try_deserialize()?;

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                app_config.providers.openai_api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("FAL_KEY") {
            if !key.is_empty() {
                app_config.providers.fal_api_key = Some(key);
            }
        }

        Ok(app_config)
    }
}
