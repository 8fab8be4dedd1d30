//! Dialogue Store Port - per-conversation dialogue state between turns.

use async_trait::async_trait;

use crate::domain::dialogue::ConversationState;
use crate::domain::foundation::ConversationId;

/// Port for loading and saving conversation state.
///
/// Stores may forget idle conversations; a forgotten conversation loads as
/// blank, exactly like one never seen.
#[async_trait]
pub trait DialogueStore: Send + Sync {
    /// Loads the state of a conversation.
    async fn load(&self, conversation: ConversationId) -> ConversationState;

    /// Replaces the state of a conversation.
    async fn save(&self, conversation: ConversationId, state: &ConversationState);
}
