use serde::Deserialize;

/// Liveness endpoint configuration
///
/// The route is always mounted; deployment platforms probe it externally.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthConfig {
    #[serde(default = "default_path")]
    pub path: String,
    /// Static body returned with `200 OK`
    #[serde(default = "default_message")]
    pub message: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            message: default_message(),
        }
    }
}

fn default_path() -> String {
    "/".to_string()
}

fn default_message() -> String {
    "Relay is running.".to_string()
}
