//! HTTP adapters for chat
//!
//! Exposes the message engine over REST.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, HealthResponse};
pub use handlers::{ChatAppState, CONVERSATION_HEADER};
pub use routes::routes;
