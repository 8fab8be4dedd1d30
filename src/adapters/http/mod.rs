//! HTTP adapters - REST API implementations.

pub mod chat;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use chat::{ChatAppState, ErrorResponse};

/// Builds the application router with tracing, timeout and CORS layers.
pub fn app(state: ChatAppState, server: &ServerConfig) -> Router {
    chat::routes()
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.allowed_origins()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any origin when none are configured; unparsable origins are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}
