use std::net::SocketAddr;
use std::path::Path;

use http::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::{AnyOrArray, CHAT_PATH, Config, ServerConfig, UpstreamConfig};

/// Upstream credential (required in environment mode)
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Listen port on all interfaces
pub const PORT_VAR: &str = "PORT";
/// `*` or a comma-separated list of browser origins
pub const ALLOWED_ORIGIN_VAR: &str = "ALLOWED_ORIGIN";
/// Model identifier override
pub const MODEL_VAR: &str = "GEMINI_MODEL";

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Build configuration from process environment variables
    ///
    /// Reads [`API_KEY_VAR`], [`PORT_VAR`], [`ALLOWED_ORIGIN_VAR`] and
    /// [`MODEL_VAR`]. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is missing, the port is not a
    /// valid `u16`, or validation fails
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = non_empty_var(API_KEY_VAR)
            .ok_or_else(|| anyhow::anyhow!("{API_KEY_VAR} is not set; an upstream credential is required"))?;

        let mut server = ServerConfig::default();

        if let Some(port) = non_empty_var(PORT_VAR) {
            let port: u16 = port
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid {PORT_VAR} value `{port}`: {e}"))?;
            server.listen_address = Some(SocketAddr::from(([0, 0, 0, 0], port)));
        }

        if let Some(origins) = non_empty_var(ALLOWED_ORIGIN_VAR) {
            server.cors.origins = AnyOrArray::parse_list(&origins);
        }

        let mut upstream = UpstreamConfig::new(SecretString::from(api_key));
        if let Some(model) = non_empty_var(MODEL_VAR) {
            upstream.model = model;
        }

        let config = Self { server, upstream };
        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is empty or server settings are
    /// inconsistent
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_upstream()?;
        self.validate_server()?;
        Ok(())
    }

    fn validate_upstream(&self) -> anyhow::Result<()> {
        if self.upstream.api_key.expose_secret().trim().is_empty() {
            anyhow::bail!("upstream.api_key must not be empty");
        }

        if self.upstream.model.trim().is_empty() {
            anyhow::bail!("upstream.model must not be empty");
        }

        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        if self.server.body_limit == 0 {
            anyhow::bail!("server.body_limit must be greater than 0");
        }

        let health_path = &self.server.health.path;
        if !health_path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/': `{health_path}`");
        }
        if health_path == CHAT_PATH {
            anyhow::bail!("server.health.path cannot be `{CHAT_PATH}`");
        }
        if health_path.contains(['{', '}', '*']) {
            anyhow::bail!("server.health.path must be a literal path without captures or wildcards: `{health_path}`");
        }

        if let AnyOrArray::List(origins) = &self.server.cors.origins {
            if origins.is_empty() {
                anyhow::bail!("server.cors.origins must list at least one origin or be \"*\"");
            }
            for origin in origins {
                HeaderValue::from_str(origin).map_err(|e| anyhow::anyhow!("invalid CORS origin `{origin}`: {e}"))?;
            }
        }

        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
