//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod chat;

pub use chat::{
    ChatServices, HandleMessageCommand, HandleMessageError, HandleMessageHandler, Reply,
    WeatherDialogue, WeatherOutcome,
};
