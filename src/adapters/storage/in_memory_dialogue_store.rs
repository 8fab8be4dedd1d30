//! In-Memory Dialogue Store Adapter
//!
//! Keeps conversation state in memory. Blank states are dropped instead of
//! stored, and conversations idle for longer than the timeout are forgotten.

use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialogue::ConversationState;
use crate::domain::foundation::ConversationId;
use crate::ports::DialogueStore;

use super::expiring_map::ExpiringMap;

/// In-memory storage for conversation state
#[derive(Debug, Clone, Default)]
pub struct InMemoryDialogueStore {
    states: Arc<RwLock<ExpiringMap<ConversationId, ConversationState>>>,
}

impl InMemoryDialogueStore {
    /// Create a new in-memory store with the default idle timeout
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store forgetting conversations idle for longer than `idle_timeout`
    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            states: Arc::new(RwLock::new(ExpiringMap::new(idle_timeout))),
        }
    }

    /// Get the number of conversations with stored state
    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }
}

#[async_trait]
impl DialogueStore for InMemoryDialogueStore {
    async fn load(&self, conversation: ConversationId) -> ConversationState {
        let mut states = self.states.write().await;
        states.get(&conversation).cloned().unwrap_or_default()
    }

    async fn save(&self, conversation: ConversationId, state: &ConversationState) {
        let mut states = self.states.write().await;
        if state.is_blank() {
            states.remove(&conversation);
        } else {
            states.insert(conversation, state.clone());
        }
    }
}
