//! Axum route for the browser-facing chat endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, routing};
use relay_config::{CHAT_PATH, UpstreamConfig};

use crate::error::ChatError;
use crate::provider::Provider;
use crate::provider::google::GoogleProvider;
use crate::types::{ChatPayload, ChatResponse};

/// Shared state for the chat handler
///
/// Holds the provider built once at startup; nothing in it changes per
/// request.
#[derive(Clone)]
pub struct ChatState {
    provider: Arc<dyn Provider>,
}

impl ChatState {
    /// Wrap an already constructed provider
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Build state backed by the Google provider
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be constructed
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, ChatError> {
        let provider = GoogleProvider::new(config)?;

        tracing::info!(provider = %provider.name(), model = %provider.model(), "chat provider ready");

        Ok(Self::new(Arc::new(provider)))
    }
}

/// Build the router serving `POST /chat`
pub fn chat_router(state: ChatState) -> Router {
    Router::new()
        .route(CHAT_PATH, routing::post(chat))
        .with_state(state)
}

/// Handle `POST /chat`
///
/// A body without a JSON content type is read as an empty payload, so it
/// fails validation with the missing-field message.
async fn chat(
    State(state): State<ChatState>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Result<Json<ChatResponse>, ChatError> {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(JsonRejection::MissingJsonContentType(_)) => ChatPayload::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    let request = payload.validate()?;
    let response = state.provider.generate(&request).await?;

    Ok(Json(response))
}
