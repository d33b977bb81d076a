//! Provider trait and implementations for upstream LLM backends

pub mod google;

use async_trait::async_trait;

use crate::error::ChatError;
use crate::types::{ChatRequest, ChatResponse};

/// Trait implemented by each upstream backend
///
/// One call to [`Provider::generate`] is exactly one upstream request; the
/// proxy never retries.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Model identifier every request is sent to
    fn model(&self) -> &str;

    /// Send a non-streaming generation request and return the reply text
    async fn generate(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError>;
}
