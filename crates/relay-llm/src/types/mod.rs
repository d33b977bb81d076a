//! Request and response types for the chat endpoint
//!
//! `ChatPayload` is what browsers send; `ChatRequest` is the validated,
//! provider-agnostic form handed to a [`Provider`](crate::Provider).

pub mod request;
pub mod response;

pub use request::{ChatPayload, ChatRequest, Message};
pub use response::ChatResponse;
