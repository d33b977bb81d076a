//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use relay_config::{AnyOrArray, Config, ServerConfig, UpstreamConfig};
use secrecy::SecretString;

use super::TEST_API_KEY;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    ///
    /// The upstream points at an address nothing listens on until
    /// [`Self::with_upstream`] replaces it.
    pub fn new() -> Self {
        let mut upstream = UpstreamConfig::new(SecretString::from(TEST_API_KEY));
        upstream.base_url = Some("http://127.0.0.1:9/v1beta".parse().expect("valid URL"));

        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                upstream,
            },
        }
    }

    /// Point the upstream at a mock backend
    pub fn with_upstream(mut self, base_url: &str) -> Self {
        self.config.upstream.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Restrict cross-origin requests to the given origins
    pub fn with_allowed_origins(mut self, origins: &[&str]) -> Self {
        self.config.server.cors.origins = AnyOrArray::List(origins.iter().map(|&o| o.to_owned()).collect());
        self
    }

    /// Set the request body limit in bytes
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.config.server.body_limit = limit;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
