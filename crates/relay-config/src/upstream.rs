use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Model used when the configuration does not name one
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Google Generative Language API settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// API key sent with every `generateContent` call
    pub api_key: SecretString,
    /// Model identifier used for every call
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL override (defaults to the public `v1beta` endpoint)
    #[serde(default)]
    pub base_url: Option<Url>,
}

impl UpstreamConfig {
    /// Settings for the public endpoint and default model
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            model: default_model(),
            base_url: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
