use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::signaling::{SignalingService, ws_handler};

/// Relay configuration. The allowed browser origin is the only knob and is
/// supplied by the embedding process; everything else is in-memory state.
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    pub allowed_origin: Option<String>,
}

/// Build the axum router exposing the signaling WebSocket. Binding and
/// serving are the embedder's job.
pub fn router(config: &RelayConfig, service: SignalingService) -> Router {
    let cors = match config.allowed_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Some(Err(e)) => {
            warn!("Invalid allowed origin, refusing cross-origin requests: {}", e);
            CorsLayer::new()
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    Router::new()
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(service)
}
