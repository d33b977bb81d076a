#![allow(dead_code)]

pub mod config;
pub mod mock_gemini;
pub mod server;

/// API key configured by [`config::ConfigBuilder`]
pub const TEST_API_KEY: &str = "test-gemini-key";
