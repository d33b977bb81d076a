//! Mock Gemini backend for integration tests
//!
//! Serves `POST /v1beta/models/{model}:generateContent` with canned replies
//! and records what the relay sent.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// How the mock answers `generateContent`
#[derive(Clone)]
enum Behavior {
    /// Single candidate with the given text
    Reply(String),
    /// Google-style error payload that echoes the caller's key
    Reject,
    /// Prompt blocked by safety filters, no candidates
    Blocked,
    /// `200 OK` with a body that is not JSON
    Garbled,
}

/// Mock Gemini backend that returns predictable responses
pub struct MockGemini {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockGeminiState>,
}

struct MockGeminiState {
    behavior: Behavior,
    call_count: AtomicU32,
    last_model_action: Mutex<Option<String>>,
    last_body: Mutex<Option<Value>>,
    last_api_key: Mutex<Option<String>>,
}

impl MockGemini {
    /// Start a mock that replies with the given text
    pub async fn start_with_reply(text: &str) -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Reply(text.to_owned())).await
    }

    /// Start a mock that rejects every call with an error naming the key
    pub async fn start_rejecting() -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Reject).await
    }

    /// Start a mock that reports every prompt as blocked
    pub async fn start_blocking() -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Blocked).await
    }

    /// Start a mock that answers `200 OK` with an HTML page
    pub async fn start_garbled() -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Garbled).await
    }

    async fn start_inner(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockGeminiState {
            behavior,
            call_count: AtomicU32::new(0),
            last_model_action: Mutex::new(None),
            last_body: Mutex::new(None),
            last_api_key: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1beta/models/{model_action}", routing::post(handle_generate_content))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the upstream
    pub fn base_url(&self) -> String {
        format!("http://{}/v1beta", self.addr)
    }

    /// Number of `generateContent` calls received
    pub fn call_count(&self) -> u32 {
        self.state.call_count.load(Ordering::Relaxed)
    }

    /// Path segment of the last call, e.g. `gemini-2.5-flash:generateContent`
    pub fn last_model_action(&self) -> Option<String> {
        self.state.last_model_action.lock().unwrap().clone()
    }

    /// JSON body of the last call
    pub fn last_body(&self) -> Option<Value> {
        self.state.last_body.lock().unwrap().clone()
    }

    /// `x-goog-api-key` header of the last call
    pub fn last_api_key(&self) -> Option<String> {
        self.state.last_api_key.lock().unwrap().clone()
    }
}

impl Drop for MockGemini {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_generate_content(
    State(state): State<Arc<MockGeminiState>>,
    Path(model_action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.call_count.fetch_add(1, Ordering::Relaxed);

    let api_key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    *state.last_model_action.lock().unwrap() = Some(model_action);
    *state.last_body.lock().unwrap() = Some(body);
    *state.last_api_key.lock().unwrap() = api_key.clone();

    match &state.behavior {
        Behavior::Reply(text) => Json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 2, "totalTokenCount": 6}
        }))
        .into_response(),
        Behavior::Reject => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": {
                    "code": 400,
                    "message": format!("API key not valid: {}", api_key.unwrap_or_default()),
                    "status": "INVALID_ARGUMENT"
                }
            })),
        )
            .into_response(),
        Behavior::Blocked => Json(json!({"promptFeedback": {"blockReason": "SAFETY"}})).into_response(),
        Behavior::Garbled => (
            [(axum::http::header::CONTENT_TYPE, "text/html")],
            "<html>upstream maintenance</html>",
        )
            .into_response(),
    }
}
