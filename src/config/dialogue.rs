//! Dialogue configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::storage::DEFAULT_IDLE_TTL_SECS;

/// Canned replies and the acceptance threshold of the message engine
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// Confidence from which a classification is taken at face value
    #[serde(default = "default_accept_threshold")]
    pub accept_threshold: f64,

    /// Reply lines for an empty message
    #[serde(default = "default_welcome")]
    pub welcome: Vec<String>,

    /// Reply lines when no answer could be produced
    #[serde(default = "default_retry")]
    pub retry: Vec<String>,

    /// Seconds a conversation's dialogue state is kept without traffic
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl DialogueConfig {
    pub fn idle_timeout(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.idle_timeout_secs).unwrap_or(i64::MAX))
    }

    /// Validate dialogue configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.accept_threshold > 0.0 && self.accept_threshold <= 1.0) {
            return Err(ValidationError::InvalidThreshold("dialogue.accept_threshold"));
        }
        if !has_text(&self.welcome) {
            return Err(ValidationError::EmptyReply("dialogue.welcome"));
        }
        if !has_text(&self.retry) {
            return Err(ValidationError::EmptyReply("dialogue.retry"));
        }
        if self.idle_timeout_secs == 0 {
            return Err(ValidationError::InvalidIdleTimeout("dialogue.idle_timeout_secs"));
        }
        Ok(())
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            accept_threshold: default_accept_threshold(),
            welcome: default_welcome(),
            retry: default_retry(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

fn has_text(lines: &[String]) -> bool {
    lines.iter().any(|line| !line.trim().is_empty())
}

fn default_idle_timeout() -> u64 {
    DEFAULT_IDLE_TTL_SECS as u64
}

fn default_accept_threshold() -> f64 {
    0.9
}

fn default_welcome() -> Vec<String> {
    vec![
        "Hello! I can tell you about the weather, share a joke, or look things up.".to_string(),
        "What would you like to know?".to_string(),
    ]
}

fn default_retry() -> Vec<String> {
    vec!["Sorry, I couldn't find an answer to that. Could you try rephrasing?".to_string()]
}
