//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config` and
//! `dotenvy` crates. An optional YAML file is read first, then environment
//! variables with the `CONCIERGE` prefix override it. Nested values use
//! double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use concierge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.bind_addr().unwrap());
//! ```

mod assistant;
mod dialogue;
mod error;
mod server;
mod services;
mod weather;

pub use assistant::{AssistantConfig, AssistantsConfig};
pub use dialogue::DialogueConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use services::{EncyclopediaConfig, JokesConfig};
pub use weather::{Units, WeatherConfig};

use serde::Deserialize;
use std::path::Path;

/// Environment variable naming the YAML configuration file
pub const CONFIG_FILE_VAR: &str = "CONCIERGE_CONFIG";

/// YAML file read when `CONCIERGE_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "concierge.yaml";

/// Root application configuration
///
/// Load using [`AppConfig::load()`]; it is read once at startup and never
/// changes afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// NLU assistants and the fallback link between them
    pub assistants: AssistantsConfig,

    /// Weather data provider
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Random-joke service
    #[serde(default)]
    pub jokes: JokesConfig,

    /// Encyclopedia search
    #[serde(default)]
    pub encyclopedia: EncyclopediaConfig,

    /// Canned replies and acceptance threshold
    #[serde(default)]
    pub dialogue: DialogueConfig,
}

impl AppConfig {
    /// Load configuration from the YAML file and environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the YAML file named by `CONCIERGE_CONFIG` (default `concierge.yaml`), if it exists
    /// 3. Overrides it with environment variables with `CONCIERGE` prefix
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CONCIERGE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CONCIERGE__ASSISTANTS__PRIMARY__API_KEY=...` -> `assistants.primary.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required values are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let path =
            std::env::var(CONFIG_FILE_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(path)
    }

    /// Load configuration from a specific YAML file plus environment overrides
    ///
    /// A missing file is not an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::File::from(path.as_ref())
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::default()
                    .prefix("CONCIERGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.assistants.validate()?;
        self.weather.validate()?;
        self.jokes.validate()?;
        self.encyclopedia.validate()?;
        self.dialogue.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
