//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, validation errors and the state machine trait
//! shared by the rest of the domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{ConversationId, IntentName};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
