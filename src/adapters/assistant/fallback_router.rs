//! Fallback Router - consults a secondary assistant when the primary is unsure.
//!
//! The primary result is handed over to the secondary when its confidence is
//! below the link threshold or when no intent was recognized. Empty results and
//! bypassed requests are returned untouched. Only one level of fallback exists.
//!
//! # Example
//!
//! ```ignore
//! let router = FallbackRouter::new(chatbot)
//!     .with_fallback(wikibot, FallbackThreshold::new(0.9)?);
//! ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::classification::{ClassificationResult, IntentTeaching};
use crate::domain::fallback::FallbackThreshold;
use crate::ports::{Assistant, AssistantError, AssistantInfo, ClassifyRequest};

/// Link from a primary assistant to its secondary.
#[derive(Clone)]
pub struct FallbackLink {
    pub secondary: Arc<dyn Assistant>,
    pub threshold: FallbackThreshold,
}

/// Assistant wrapper with confidence-based fallback.
#[derive(Clone)]
pub struct FallbackRouter {
    primary: Arc<dyn Assistant>,
    link: Option<FallbackLink>,
}

impl FallbackRouter {
    /// Creates a router with only a primary assistant.
    pub fn new(primary: Arc<dyn Assistant>) -> Self {
        Self {
            primary,
            link: None,
        }
    }

    /// Links a secondary assistant, replacing any previous link.
    pub fn with_fallback(mut self, secondary: Arc<dyn Assistant>, threshold: FallbackThreshold) -> Self {
        self.link = Some(FallbackLink {
            secondary,
            threshold,
        });
        self
    }

    pub fn link(&self) -> Option<&FallbackLink> {
        self.link.as_ref()
    }
}

#[async_trait]
impl Assistant for FallbackRouter {
    async fn classify(&self, request: ClassifyRequest) -> Result<ClassificationResult, AssistantError> {
        let result = self.primary.classify(request.clone()).await?;

        if request.bypass {
            return Ok(result);
        }

        match &self.link {
            Some(link) if link.threshold.should_delegate(&result) => {
                tracing::info!(
                    primary = %self.primary.info().name,
                    secondary = %link.secondary.info().name,
                    intent = ?result.intent(),
                    confidence = ?result.confidence(),
                    threshold = link.threshold.value(),
                    "Delegating to fallback assistant"
                );
                link.secondary.classify(request).await
            }
            _ => Ok(result),
        }
    }

    async fn register_intent(&self, teaching: IntentTeaching) -> Result<(), AssistantError> {
        self.primary.register_intent(teaching).await
    }

    fn info(&self) -> AssistantInfo {
        self.primary.info()
    }
}
