//! Chat proxying for Relay
//!
//! Validates browser chat payloads, forwards them to the Google Generative
//! Language API with the server-held credential, and returns only the
//! generated text. With the `http` feature, exposes the axum route for
//! `POST /chat`.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod error;
pub mod protocol;
pub mod provider;
#[cfg(feature = "http")]
pub mod router;
pub mod types;

pub use error::ChatError;
pub use provider::Provider;
#[cfg(feature = "http")]
pub use router::{ChatState, chat_router};
pub use types::{ChatPayload, ChatRequest, ChatResponse, Message};
