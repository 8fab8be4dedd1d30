//! v1 assistant: workspace message API with intent teaching.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::adapters::storage::ExpiringMap;
use crate::domain::classification::{ClassificationResult, IntentTeaching};
use crate::domain::foundation::ConversationId;
use crate::ports::{ApiVersion, Assistant, AssistantError, AssistantInfo, ClassifyRequest};

use super::client::{WatsonClient, WatsonConfig};
use super::wire::{V1CreateDialogNode, V1CreateIntent, V1MessageRequest, V1MessageResponse};

/// Assistant speaking the v1 `workspaces/{id}` protocol.
#[derive(Debug)]
pub struct WatsonV1Assistant {
    client: WatsonClient,
    /// Dialogue context per conversation, forgotten once idle.
    contexts: RwLock<ExpiringMap<ConversationId, Value>>,
}

impl WatsonV1Assistant {
    pub fn new(config: WatsonConfig) -> Result<Self, AssistantError> {
        let contexts = ExpiringMap::new(config.context_idle_timeout);
        Ok(Self {
            client: WatsonClient::new(config)?,
            contexts: RwLock::new(contexts),
        })
    }

    fn workspace_path(&self) -> String {
        format!("v1/workspaces/{}", self.client.config().assistant_id)
    }
}

#[async_trait]
impl Assistant for WatsonV1Assistant {
    async fn classify(&self, request: ClassifyRequest) -> Result<ClassificationResult, AssistantError> {
        let context = self.contexts.write().await.get(&request.conversation).cloned();
        let body = V1MessageRequest::new(request.text.as_deref(), &request.intents, context.as_ref());

        let raw = self
            .client
            .post(&format!("{}/message", self.workspace_path()), &body)
            .await?;

        let response: V1MessageResponse = serde_json::from_value(raw.clone())
            .map_err(|e| AssistantError::parse(format!("Invalid message response: {}", e)))?;

        if let Some(context) = response.context.clone() {
            self.contexts.write().await.insert(request.conversation, context);
        }

        Ok(response.into_result(raw))
    }

    async fn register_intent(&self, teaching: IntentTeaching) -> Result<(), AssistantError> {
        let workspace = self.workspace_path();

        self.client
            .post(
                &format!("{}/intents", workspace),
                &V1CreateIntent::from_teaching(&teaching),
            )
            .await?;

        self.client
            .post(
                &format!("{}/dialog_nodes", workspace),
                &V1CreateDialogNode::from_teaching(&teaching),
            )
            .await?;

        tracing::info!(
            assistant = %self.client.config().name,
            intent = %teaching.name,
            "Registered intent"
        );
        Ok(())
    }

    fn info(&self) -> AssistantInfo {
        AssistantInfo::new(self.client.config().name.clone(), ApiVersion::V1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_reports_v1_with_teaching() {
        let assistant =
            WatsonV1Assistant::new(WatsonConfig::new("https://example.com", "ws-9", "key").with_name("wikibot"))
                .unwrap();
        let info = assistant.info();
        assert_eq!(info.name, "wikibot");
        assert_eq!(info.api_version, ApiVersion::V1);
        assert!(info.supports_teaching);
        assert_eq!(assistant.workspace_path(), "v1/workspaces/ws-9");
    }
}
