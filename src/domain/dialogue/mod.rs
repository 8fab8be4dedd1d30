//! Dialogue module - per-conversation state for multi-turn weather questions.
//!
//! ```text
//! Idle --[weather intent, no location known]--> AwaitingLocation
//! AwaitingLocation --[location resolved or dialogue aborted]--> Idle
//! ```

mod state;

pub use state::{ConversationState, DialoguePhase, LocationRequest, PendingDialogue};
