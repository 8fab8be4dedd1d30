//! Weather service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::weather::UnitSystem;

/// Weather data provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// API host, without scheme
    #[serde(default = "default_host")]
    pub host: String,

    /// Basic auth user
    #[serde(default)]
    pub username: String,

    /// Basic auth password
    #[serde(default = "empty_secret")]
    pub password: Secret<String>,

    /// Measurement system for readings
    #[serde(default)]
    pub units: Units,

    /// Response language
    #[serde(default = "default_language")]
    pub language: String,

    /// Place used when a conversation has not named one yet
    pub default_location: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Measurement system
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl From<Units> for UnitSystem {
    fn from(units: Units) -> Self {
        match units {
            Units::Metric => UnitSystem::Metric,
            Units::Imperial => UnitSystem::Imperial,
        }
    }
}

impl WeatherConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.units.into()
    }

    /// Validate weather configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.host.trim().is_empty() {
            return Err(ValidationError::MissingRequired("weather.host"));
        }
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingRequired("weather.username"));
        }
        if self.password.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("weather.password"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            username: String::new(),
            password: empty_secret(),
            units: Units::default(),
            language: default_language(),
            default_location: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_host() -> String {
    "api.weather.com".to_string()
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout() -> u64 {
    10
}
