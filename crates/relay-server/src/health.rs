use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Router, routing};
use http::StatusCode;
use relay_config::HealthConfig;

/// Build the liveness route
pub fn health_router(config: &HealthConfig) -> Router {
    let message: Arc<str> = Arc::from(config.message.as_str());

    Router::new()
        .route(&config.path, routing::get(health_handler))
        .with_state(message)
}

/// Health check handler
async fn health_handler(State(message): State<Arc<str>>) -> impl IntoResponse {
    (StatusCode::OK, message.to_string())
}
