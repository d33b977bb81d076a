//! Conversion between chat types and Google Generative Language wire format

use crate::error::ChatError;
use crate::protocol::google::{GoogleContent, GooglePart, GoogleRequest, GoogleResponse};
use crate::types::{ChatRequest, ChatResponse, Message};

// -- Outbound: chat request -> Google wire request --

impl From<&ChatRequest> for GoogleRequest {
    fn from(req: &ChatRequest) -> Self {
        let contents = req.messages.iter().map(message_to_google).collect();

        let system_instruction = req.system_instruction.as_ref().map(|text| GoogleContent {
            role: None,
            parts: vec![GooglePart::text(text.clone())],
        });

        Self {
            contents,
            system_instruction,
        }
    }
}

fn message_to_google(msg: &Message) -> GoogleContent {
    GoogleContent {
        role: msg.role.clone(),
        parts: msg.parts.iter().map(|text| GooglePart::text(text.clone())).collect(),
    }
}

// -- Inbound: Google wire response -> chat response --

impl TryFrom<GoogleResponse> for ChatResponse {
    type Error = ChatError;

    /// Take the text of the first candidate, skipping thought parts
    ///
    /// A response without any reply text (blocked prompt, filtered
    /// candidate, tool-only output) is an upstream failure.
    fn try_from(response: GoogleResponse) -> Result<Self, Self::Error> {
        let candidate = response.candidates.into_iter().next();

        let text: Option<String> = candidate
            .as_ref()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|part| !part.thought.unwrap_or(false))
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .filter(|text: &String| !text.is_empty());

        if let Some(text) = text {
            return Ok(Self { text });
        }

        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("prompt blocked: {r}"))
            .or_else(|| {
                candidate
                    .and_then(|c| c.finish_reason)
                    .map(|r| format!("finish reason: {r}"))
            })
            .unwrap_or_else(|| "no candidates".to_owned());

        Err(ChatError::Upstream(format!("response contained no text ({reason})")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(value: serde_json::Value) -> GoogleResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_carries_contents_and_system_instruction() {
        let request = ChatRequest {
            messages: vec![
                Message::user("hello"),
                Message {
                    role: Some("model".to_owned()),
                    parts: vec!["hi".to_owned()],
                },
            ],
            system_instruction: Some("be brief".to_owned()),
        };

        let wire = serde_json::to_value(GoogleRequest::from(&request)).unwrap();
        assert_eq!(
            wire,
            json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "hello"}]},
                    {"role": "model", "parts": [{"text": "hi"}]}
                ],
                "systemInstruction": {"parts": [{"text": "be brief"}]}
            })
        );
    }

    #[test]
    fn absent_system_instruction_is_omitted() {
        let request = ChatRequest {
            messages: vec![Message {
                role: None,
                parts: vec!["hello".to_owned()],
            }],
            system_instruction: None,
        };

        let wire = serde_json::to_value(GoogleRequest::from(&request)).unwrap();
        assert_eq!(wire, json!({"contents": [{"parts": [{"text": "hello"}]}]}));
        assert!(wire.get("systemInstruction").is_none());
    }

    #[test]
    fn extracts_first_candidate_text() {
        let wire = response(json!({
            "candidates": [
                {
                    "content": {"role": "model", "parts": [{"text": "hi "}, {"text": "there"}]},
                    "finishReason": "STOP"
                },
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 2, "totalTokenCount": 5}
        }));

        let chat = ChatResponse::try_from(wire).unwrap();
        assert_eq!(chat.text, "hi there");
    }

    #[test]
    fn skips_thought_parts_and_extra_keys() {
        let wire = response(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "thinking...", "thought": true},
                        {"text": "answer", "thoughtSignature": "abc"}
                    ]
                }
            }]
        }));

        assert_eq!(ChatResponse::try_from(wire).unwrap().text, "answer");
    }

    #[test]
    fn blocked_prompt_is_upstream_error() {
        let wire = response(json!({"promptFeedback": {"blockReason": "SAFETY"}}));

        let err = ChatResponse::try_from(wire).unwrap_err();
        assert!(matches!(err, ChatError::Upstream(ref msg) if msg.contains("SAFETY")));
    }

    #[test]
    fn candidate_without_content_reports_finish_reason() {
        let wire = response(json!({"candidates": [{"finishReason": "RECITATION"}]}));

        let err = ChatResponse::try_from(wire).unwrap_err();
        assert!(matches!(err, ChatError::Upstream(ref msg) if msg.contains("RECITATION")));
    }

    #[test]
    fn empty_response_is_upstream_error() {
        let err = ChatResponse::try_from(response(json!({}))).unwrap_err();
        assert!(matches!(err, ChatError::Upstream(ref msg) if msg.contains("no candidates")));
    }
}
