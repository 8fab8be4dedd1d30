//! v2 assistant: session-scoped message API without intent teaching.

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::adapters::storage::ExpiringMap;
use crate::domain::classification::{ClassificationResult, IntentTeaching};
use crate::domain::foundation::ConversationId;
use crate::domain::session::SessionManager;
use crate::ports::{ApiVersion, Assistant, AssistantError, AssistantInfo, ClassifyRequest};

use super::client::{WatsonClient, WatsonConfig};
use super::wire::{V2MessageRequest, V2MessageResponse, V2SessionResponse};

/// Assistant speaking the v2 `assistants/{id}/sessions` protocol.
#[derive(Debug)]
pub struct WatsonV2Assistant {
    client: WatsonClient,
    sessions: SessionManager,
    /// Dialogue context per conversation, forgotten once idle.
    contexts: RwLock<ExpiringMap<ConversationId, Value>>,
    return_context: bool,
}

impl WatsonV2Assistant {
    pub fn new(config: WatsonConfig) -> Result<Self, AssistantError> {
        let contexts = ExpiringMap::new(config.context_idle_timeout);
        Ok(Self {
            client: WatsonClient::new(config)?,
            sessions: SessionManager::default(),
            contexts: RwLock::new(contexts),
            return_context: true,
        })
    }

    /// Replaces the session manager, e.g. to change the idle timeout.
    pub fn with_sessions(mut self, sessions: SessionManager) -> Self {
        self.sessions = sessions;
        self
    }

    fn assistant_path(&self) -> String {
        format!("v2/assistants/{}", self.client.config().assistant_id)
    }

    async fn create_session(&self) -> Result<String, AssistantError> {
        let raw = self
            .client
            .post(&format!("{}/sessions", self.assistant_path()), &json!({}))
            .await?;
        serde_json::from_value::<V2SessionResponse>(raw)
            .map(|r| r.session_id)
            .map_err(|e| AssistantError::parse(format!("Invalid session response: {}", e)))
    }
}

#[async_trait]
impl Assistant for WatsonV2Assistant {
    async fn classify(&self, request: ClassifyRequest) -> Result<ClassificationResult, AssistantError> {
        let session_id = self.sessions.session_id(|| self.create_session()).await?;
        let context = self.contexts.write().await.get(&request.conversation).cloned();

        let body = V2MessageRequest::new(
            request.text.as_deref(),
            &request.intents,
            context.as_ref(),
            self.return_context,
        );
        let path = format!("{}/sessions/{}/message", self.assistant_path(), session_id);

        let raw = match self.client.post(&path, &body).await {
            Ok(raw) => raw,
            Err(err) => {
                if matches!(err, AssistantError::Status { status: 404, .. }) {
                    // Session dropped server-side; the next call starts a new one.
                    self.sessions.invalidate().await;
                }
                return Err(err);
            }
        };

        let response: V2MessageResponse = serde_json::from_value(raw.clone())
            .map_err(|e| AssistantError::parse(format!("Invalid message response: {}", e)))?;

        if let Some(context) = response.context.clone() {
            self.contexts.write().await.insert(request.conversation, context);
        }

        Ok(response.into_result(raw))
    }

    async fn register_intent(&self, _teaching: IntentTeaching) -> Result<(), AssistantError> {
        Err(AssistantError::unsupported(
            "intent registration requires a v1 workspace",
        ))
    }

    fn info(&self) -> AssistantInfo {
        AssistantInfo::new(self.client.config().name.clone(), ApiVersion::V2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant() -> WatsonV2Assistant {
        WatsonV2Assistant::new(
            WatsonConfig::new("https://example.com", "asst-1", "key").with_name("chatbot"),
        )
        .unwrap()
    }

    #[test]
    fn info_reports_v2_without_teaching() {
        let info = assistant().info();
        assert_eq!(info.name, "chatbot");
        assert_eq!(info.api_version, ApiVersion::V2);
        assert!(!info.supports_teaching);
    }

    #[test]
    fn paths_are_scoped_to_the_assistant() {
        assert_eq!(assistant().assistant_path(), "v2/assistants/asst-1");
    }

    #[tokio::test]
    async fn teaching_is_unsupported() {
        let teaching = IntentTeaching::new("hello", None, "Hi there.").unwrap();
        let err = assistant().register_intent(teaching).await.unwrap_err();
        assert!(matches!(err, AssistantError::Unsupported(_)));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_network_error() {
        let assistant = WatsonV2Assistant::new(
            WatsonConfig::new("http://127.0.0.1:9", "asst-1", "key")
                .with_timeout(std::time::Duration::from_secs(2)),
        )
        .unwrap();

        let err = assistant
            .classify(ClassifyRequest::text(ConversationId::shared(), "hi"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AssistantError::Network(_) | AssistantError::Timeout { .. }
        ));
        assert!(assistant.sessions.current().await.is_none());
    }
}
