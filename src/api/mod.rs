mod handlers;
mod models;

use std::sync::Arc;

use axum::{http::Method, routing::post, Router};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

pub use handlers::chat;
pub use models::{ChatRequest, ChatResponse, ErrorResponse};

/// Only a request whose `Origin` equals the configured origin gets an
/// `Access-Control-Allow-Origin` header, so browsers on any other origin fail
/// the cross-origin check. Preflights are answered with 200.
pub fn cors_layer(state: &AppState) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([state.config.allowed_origin.clone()]))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
