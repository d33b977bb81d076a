#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod upstream;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use loader::{ALLOWED_ORIGIN_VAR, API_KEY_VAR, MODEL_VAR, PORT_VAR};
pub use server::*;
pub use upstream::*;

/// Top-level Relay configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener, health route and browser-facing policy
    #[serde(default)]
    pub server: ServerConfig,
    /// Generative Language API settings, including the credential
    pub upstream: UpstreamConfig,
}
