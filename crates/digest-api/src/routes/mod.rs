//! Route definitions
//!
//! Health probes at the root, everything else mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{digest, health, reactions};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(reaction_routes())
        .merge(chat_routes())
}

/// Reaction event intake
fn reaction_routes() -> Router<AppState> {
    Router::new().route("/reactions/events", post(reactions::post_event))
}

/// Chat routes
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chats/:chat_id/digest", get(digest::get_digest))
        .route("/chats/:chat_id/digest/text", get(digest::get_digest_text))
        .route(
            "/chats/:chat_id/messages/:message_id/reactions",
            get(reactions::get_record).delete(reactions::delete_record),
        )
}
