//! Storage Adapters
//!
//! Implementations of the DialogueStore port.
//!
//! - **InMemoryDialogueStore** - per-conversation state in memory, idle entries expire
//! - **ExpiringMap** - idle-TTL map shared with the assistant context caches

mod expiring_map;
mod in_memory_dialogue_store;

pub use expiring_map::{ExpiringMap, DEFAULT_IDLE_TTL_SECS};
pub use in_memory_dialogue_store::InMemoryDialogueStore;
