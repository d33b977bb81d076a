use serde::Deserialize;
use serde_json::Value;

use crate::error::ChatError;

/// Raw `POST /chat` body
///
/// `contents` stays untyped until [`ChatPayload::validate`] so that a
/// wrongly shaped value is reported as a missing field rather than as a
/// decoding failure. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    /// A prompt string, or a list of `{ role?, parts: [{ text }] }` turns
    #[serde(default)]
    pub contents: Option<Value>,
    /// Optional directive that conditions the model
    #[serde(default)]
    pub system_instruction: Option<String>,
}

/// Validated chat request, ready for a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Conversation turns, never empty
    pub messages: Vec<Message>,
    /// System instruction, never empty when present
    pub system_instruction: Option<String>,
}

/// One conversation turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Role as sent by the caller (`user`, `model`), passed through untouched
    pub role: Option<String>,
    /// Text parts, never empty
    pub parts: Vec<String>,
}

impl Message {
    /// A single-part user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_owned()),
            parts: vec![text.into()],
        }
    }
}

#[derive(Deserialize)]
struct Turn {
    #[serde(default)]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: String,
}

impl ChatPayload {
    /// Check the payload shape and convert it into a [`ChatRequest`]
    ///
    /// A blank system instruction is dropped so it is never forwarded as an
    /// empty string.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::MissingField`] for `contents` when it is absent,
    /// blank, an empty list, or contains a turn without text parts
    pub fn validate(self) -> Result<ChatRequest, ChatError> {
        let messages = match self.contents {
            Some(Value::String(text)) if !text.trim().is_empty() => vec![Message::user(text)],
            Some(Value::Array(turns)) if !turns.is_empty() => turns
                .into_iter()
                .map(parse_turn)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(ChatError::missing_contents)?,
            _ => return Err(ChatError::missing_contents()),
        };

        let system_instruction = self.system_instruction.filter(|s| !s.trim().is_empty());

        Ok(ChatRequest {
            messages,
            system_instruction,
        })
    }
}

fn parse_turn(value: Value) -> Option<Message> {
    let turn: Turn = serde_json::from_value(value).ok()?;
    if turn.parts.is_empty() {
        return None;
    }

    Some(Message {
        role: turn.role,
        parts: turn.parts.into_iter().map(|p| p.text).collect(),
    })
}
