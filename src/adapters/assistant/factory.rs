//! Builds assistants and the fallback router from configuration.

use secrecy::ExposeSecret;
use std::sync::Arc;

use crate::config::{AssistantConfig, AssistantsConfig};
use crate::domain::fallback::FallbackThreshold;
use crate::ports::{ApiVersion, Assistant, AssistantError};

use super::client::WatsonConfig;
use super::fallback_router::FallbackRouter;
use super::watson_v1::WatsonV1Assistant;
use super::watson_v2::WatsonV2Assistant;

/// The router every message goes through, plus direct access to the secondary
/// for intent teaching.
#[derive(Clone)]
pub struct AssistantStack {
    pub router: Arc<dyn Assistant>,
    pub secondary: Option<Arc<dyn Assistant>>,
}

impl AssistantStack {
    pub fn from_config(config: &AssistantsConfig) -> Result<Self, AssistantError> {
        let primary = build_assistant(&config.primary)?;
        let mut router = FallbackRouter::new(primary);

        let secondary = match &config.secondary {
            Some(secondary_config) => {
                let secondary = build_assistant(secondary_config)?;
                let threshold = FallbackThreshold::new(config.fallback_threshold)?;
                router = router.with_fallback(Arc::clone(&secondary), threshold);
                Some(secondary)
            }
            None => None,
        };

        Ok(Self {
            router: Arc::new(router),
            secondary,
        })
    }
}

/// Builds one assistant for the configured API generation.
pub fn build_assistant(config: &AssistantConfig) -> Result<Arc<dyn Assistant>, AssistantError> {
    let watson = WatsonConfig::new(
        config.url.clone(),
        config.assistant_id.clone(),
        config.api_key.expose_secret().clone(),
    )
    .with_name(config.name.clone())
    .with_version(config.version.clone())
    .with_timeout(config.timeout())
    .with_context_idle_timeout(config.context_idle_timeout());

    tracing::debug!(assistant = %config.name, api_version = %config.api_version, "Building assistant");

    Ok(match config.api_version {
        ApiVersion::V1 => Arc::new(WatsonV1Assistant::new(watson)?),
        ApiVersion::V2 => Arc::new(WatsonV2Assistant::new(watson)?),
    })
}
