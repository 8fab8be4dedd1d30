//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `classification` - Normalized assistant output, entity index, teaching payloads
//! - `session` - Idle-timed assistant session handles
//! - `fallback` - Threshold deciding when a secondary assistant takes over
//! - `dialogue` - Per-conversation weather slot-filling state
//! - `weather` - Notions, observations and weather answers
//! - `knowledge` - Encyclopedia snippets

pub mod classification;
pub mod dialogue;
pub mod fallback;
pub mod foundation;
pub mod knowledge;
pub mod session;
pub mod weather;
