use serde::{Deserialize, Serialize};

/// Successful `POST /chat` response
///
/// Only the generated text is returned; usage counts and finish reasons
/// stay server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
}

impl ChatResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
