//! Google Generative Language API provider implementation

use async_trait::async_trait;
use http::HeaderValue;
use reqwest::Client;
use relay_config::UpstreamConfig;
use secrecy::ExposeSecret;
use url::Url;

use super::Provider;
use crate::error::ChatError;
use crate::protocol::google::{GoogleErrorResponse, GoogleRequest, GoogleResponse};
use crate::types::{ChatRequest, ChatResponse};

/// Default Google Generative Language API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key
///
/// Sent as a header rather than the `key` query parameter so the
/// credential never appears in a URL that transport errors might echo.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Generative Language API provider
pub struct GoogleProvider {
    client: Client,
    base_url: Url,
    model: String,
    api_key: HeaderValue,
}

impl GoogleProvider {
    /// Create from upstream configuration
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Internal` if the default base URL fails to parse,
    /// the key is not a valid header value, or the HTTP client cannot be
    /// built.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ChatError> {
        let base_url = match &config.base_url {
            Some(url) => url.clone(),
            None => Url::parse(DEFAULT_BASE_URL).map_err(|e| anyhow::anyhow!("invalid default base URL: {e}"))?,
        };

        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| anyhow::anyhow!("upstream API key contains characters not allowed in a header"))?;
        api_key.set_sensitive(true);

        let client = Client::builder()
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url,
            model: config.model.clone(),
            api_key,
        })
    }

    /// Build the `generateContent` endpoint URL for the configured model
    fn generate_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/models/{}:generateContent", self.model)
    }
}

#[async_trait]
impl Provider for GoogleProvider {
    fn name(&self) -> &str {
        "google"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let wire_request = GoogleRequest::from(request);

        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, self.api_key.clone())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| ChatError::Upstream(format!("request to {} failed: {}", self.name(), e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<GoogleErrorResponse>(&body)
                .map_or(body, |e| format!("{} ({})", e.error.message, e.error.status));
            return Err(ChatError::Upstream(format!("provider returned {status}: {detail}")));
        }

        let wire_response: GoogleResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Upstream(format!("failed to parse response: {}", e.without_url())))?;

        if let Some(usage) = &wire_response.usage_metadata {
            tracing::debug!(
                provider = %self.name(),
                model = %self.model,
                prompt_tokens = usage.prompt_token_count,
                candidates_tokens = usage.candidates_token_count,
                "upstream call completed"
            );
        }

        ChatResponse::try_from(wire_response)
    }
}
