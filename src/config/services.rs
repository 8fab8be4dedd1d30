//! Joke and encyclopedia service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Random-joke service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JokesConfig {
    /// Base URL of the jokes API
    #[serde(default = "default_jokes_url")]
    pub base_url: String,

    /// Deadline in seconds for a whole batch of jokes
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Jokes fetched concurrently at most
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl JokesConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate jokes configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidUrl("jokes.base_url"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_concurrency == 0 {
            return Err(ValidationError::InvalidConcurrency);
        }
        Ok(())
    }
}

impl Default for JokesConfig {
    fn default() -> Self {
        Self {
            base_url: default_jokes_url(),
            timeout_secs: default_timeout(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

/// Encyclopedia search configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EncyclopediaConfig {
    /// Search API endpoint
    #[serde(default = "default_encyclopedia_url")]
    pub base_url: String,

    /// User-Agent header sent with every search
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl EncyclopediaConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate encyclopedia configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidUrl("encyclopedia.base_url"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for EncyclopediaConfig {
    fn default() -> Self {
        Self {
            base_url: default_encyclopedia_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn default_jokes_url() -> String {
    "https://api.chucknorris.io/jokes".to_string()
}

fn default_encyclopedia_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_user_agent() -> String {
    concat!("concierge/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_concurrency() -> usize {
    4
}
