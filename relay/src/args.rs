use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use relay_telemetry::LogFormat;

/// Relay chat proxy
#[derive(Debug, Parser)]
#[command(name = "relay", about = "Browser-facing chat proxy for the Gemini API")]
pub struct Args {
    /// Path to a TOML configuration file; the environment is read when omitted
    #[arg(short, long, env = "RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "RELAY_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directive
    #[arg(long, default_value = "info", env = "RELAY_LOG")]
    pub log_filter: String,

    /// Log output format (`text` or `json`)
    #[arg(long, default_value = "text", env = "RELAY_LOG_FORMAT")]
    pub log_format: LogFormat,
}
