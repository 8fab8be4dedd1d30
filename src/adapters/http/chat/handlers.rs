//! HTTP handlers for chat endpoints
//!
//! These handlers connect Axum routes to the message engine.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::chat::{
    HandleMessageCommand, HandleMessageError, HandleMessageHandler, Reply,
};
use crate::domain::foundation::ConversationId;

use super::dto::{ErrorResponse, HealthResponse};

/// Header carrying the client's conversation id.
pub const CONVERSATION_HEADER: &str = "x-conversation-id";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing the message engine
#[derive(Clone)]
pub struct ChatAppState {
    pub handler: Arc<HandleMessageHandler>,
}

impl ChatAppState {
    pub fn new(handler: HandleMessageHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Answer a chat message
///
/// POST /message
///
/// The body is the raw utterance. Replies with a JSON array of lines, or with
/// the assistant's raw payload and 404 when it produced no output.
pub async fn post_message(
    State(app_state): State<ChatAppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, ErrorReply> {
    let conversation = conversation_id(&headers)?;

    let cmd = HandleMessageCommand::new(conversation, body);
    let reply = app_state.handler.handle(cmd).await.map_err(|e| {
        tracing::error!(conversation = %conversation, error = %e, "Message failed");
        error_reply(e)
    })?;

    let response = match reply {
        Reply::Lines(lines) => (StatusCode::OK, Json(lines)).into_response(),
        Reply::NotFound(raw) => (StatusCode::NOT_FOUND, Json(raw)).into_response(),
    };
    Ok(response)
}

/// Liveness probe
///
/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

/// Reads the conversation id; a missing header means the shared conversation.
fn conversation_id(headers: &HeaderMap) -> Result<ConversationId, ErrorReply> {
    let Some(value) = headers.get(CONVERSATION_HEADER) else {
        return Ok(ConversationId::shared());
    };

    value
        .to_str()
        .ok()
        .and_then(|raw| ConversationId::from_str(raw.trim()).ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid X-Conversation-Id header")),
            )
        })
}

fn error_reply(err: HandleMessageError) -> ErrorReply {
    if err.is_upstream() {
        (StatusCode::BAD_GATEWAY, Json(ErrorResponse::bad_gateway(err.to_string())))
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(err.to_string())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn missing_header_is_shared_conversation() {
        let id = conversation_id(&HeaderMap::new()).unwrap();
        assert!(id.is_shared());
    }

    #[test]
    fn header_uuid_is_parsed() {
        let expected = ConversationId::new();
        let mut headers = HeaderMap::new();
        headers.insert(
            CONVERSATION_HEADER,
            HeaderValue::from_str(&expected.to_string()).unwrap(),
        );

        assert_eq!(conversation_id(&headers).unwrap(), expected);
    }

    #[test]
    fn malformed_header_is_bad_request() {
        let mut headers = HeaderMap::new();
        headers.insert(CONVERSATION_HEADER, HeaderValue::from_static("not-a-uuid"));

        let (status, body) = conversation_id(&headers).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0.code, "BAD_REQUEST");
    }
}
