//! Assistant configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::storage::DEFAULT_IDLE_TTL_SECS;
use crate::domain::fallback::DEFAULT_FALLBACK_THRESHOLD;
use crate::ports::ApiVersion;

/// Primary assistant, optional fallback assistant and the link between them
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantsConfig {
    /// Assistant every message is classified with first
    pub primary: AssistantConfig,

    /// Assistant consulted when the primary is unsure (usually a v1 workspace)
    pub secondary: Option<AssistantConfig>,

    /// Primary confidence below which the secondary takes over
    #[serde(default = "default_fallback_threshold")]
    pub fallback_threshold: f64,
}

/// Connection settings for one assistant
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Name used in logs
    #[serde(default = "default_name")]
    pub name: String,

    /// Protocol generation (1 or 2)
    #[serde(default = "default_api_version")]
    pub api_version: ApiVersion,

    /// Service instance URL
    pub url: String,

    /// Workspace id (v1) or assistant id (v2)
    pub assistant_id: String,

    /// IAM API key
    pub api_key: Secret<String>,

    /// API version date
    #[serde(default = "default_version")]
    pub version: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Seconds a conversation's context is kept without traffic
    #[serde(default = "default_context_idle")]
    pub context_idle_secs: u64,
}

impl AssistantConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn context_idle_timeout(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.context_idle_secs).unwrap_or(i64::MAX))
    }

    /// Validate one assistant's settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.url.starts_with("https://") || self.url.starts_with("http://")) {
            return Err(ValidationError::InvalidUrl("assistants.*.url"));
        }
        if self.assistant_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("assistants.*.assistant_id"));
        }
        if self.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("assistants.*.api_key"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.context_idle_secs == 0 {
            return Err(ValidationError::InvalidIdleTimeout("assistants.*.context_idle_secs"));
        }
        Ok(())
    }
}

impl AssistantsConfig {
    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.primary.validate()?;
        if let Some(secondary) = &self.secondary {
            secondary.validate()?;
        }
        if !(self.fallback_threshold > 0.0 && self.fallback_threshold <= 1.0) {
            return Err(ValidationError::InvalidThreshold("assistants.fallback_threshold"));
        }
        Ok(())
    }
}

fn default_name() -> String {
    "assistant".to_string()
}

fn default_api_version() -> ApiVersion {
    ApiVersion::V2
}

fn default_version() -> String {
    "2021-06-14".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_context_idle() -> u64 {
    DEFAULT_IDLE_TTL_SECS as u64
}

fn default_fallback_threshold() -> f64 {
    DEFAULT_FALLBACK_THRESHOLD
}
