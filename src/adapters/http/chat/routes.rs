//! Route definitions for chat endpoints

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{health, post_message, ChatAppState};

/// Create chat router with all endpoints
///
/// # Endpoints
///
/// - `POST /message` - Answer a chat message
/// - `GET /health` - Liveness probe
pub fn routes() -> Router<ChatAppState> {
    Router::new()
        .route("/message", post(post_message))
        .route("/health", get(health))
}
