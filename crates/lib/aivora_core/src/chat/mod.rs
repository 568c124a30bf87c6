//! Support chat — request extraction, prompt building and reply normalization.
//!
//! The HTTP handler in `aivora_api` is a thin shell around these functions:
//!
//! 1. [`SupportRequest::from_json`] — pull `message` / `history` out of a raw body
//! 2. [`prompt::build_support_prompt`] — compose the instruction prompt
//! 3. [`reply::normalize_reply`] — turn whatever the model returned into text

pub mod prompt;
pub mod reply;

use serde_json::Value;

use crate::models::chat::{ChatMessage, Role};

pub use prompt::{DEFAULT_USER_NAME, SYSTEM_PROMPT, build_support_prompt};
pub use reply::normalize_reply;

/// Sampling temperature for the support assistant's model.
pub const SUPPORT_TEMPERATURE: f32 = 0.3;

/// A validated support chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportRequest {
    pub message: String,
    pub history: Vec<ChatMessage>,
}

impl SupportRequest {
    /// Extract the request from a raw JSON body.
    ///
    /// Returns `None` when `message` is missing, not a string, or empty.
    /// A `history` that is not an array is treated as absent.
    pub fn from_json(body: &Value) -> Option<Self> {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())?;

        let history = body
            .get("history")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(history_entry).collect())
            .unwrap_or_default();

        Some(Self {
            message: message.to_string(),
            history,
        })
    }
}

/// Lenient conversion of one history entry: anything that is not a user
/// message is treated as the assistant.
fn history_entry(entry: &Value) -> ChatMessage {
    let role = match entry.get("role").and_then(Value::as_str) {
        Some("user") => Role::User,
        _ => Role::Assistant,
    };
    let content = match entry.get("content") {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    };
    ChatMessage { role, content }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_message_and_history() {
        let body = json!({
            "message": "How do goals work?",
            "history": [
                { "role": "user", "content": "Hi" },
                { "role": "assistant", "content": "Hello!" }
            ]
        });
        let req = SupportRequest::from_json(&body).unwrap();
        assert_eq!(req.message, "How do goals work?");
        assert_eq!(
            req.history,
            vec![ChatMessage::user("Hi"), ChatMessage::assistant("Hello!")]
        );
    }

    #[test]
    fn missing_message_is_rejected() {
        assert!(SupportRequest::from_json(&json!({})).is_none());
        assert!(SupportRequest::from_json(&json!({ "history": [] })).is_none());
    }

    #[test]
    fn non_string_message_is_rejected() {
        assert!(SupportRequest::from_json(&json!({ "message": 42 })).is_none());
        assert!(SupportRequest::from_json(&json!({ "message": null })).is_none());
        assert!(SupportRequest::from_json(&json!({ "message": ["hi"] })).is_none());
    }

    #[test]
    fn empty_message_is_rejected() {
        assert!(SupportRequest::from_json(&json!({ "message": "" })).is_none());
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(SupportRequest::from_json(&json!("hello")).is_none());
        assert!(SupportRequest::from_json(&Value::Null).is_none());
    }

    #[test]
    fn non_array_history_is_ignored() {
        let req = SupportRequest::from_json(&json!({ "message": "hi", "history": "nope" })).unwrap();
        assert!(req.history.is_empty());
    }

    #[test]
    fn unknown_roles_render_as_assistant() {
        let req = SupportRequest::from_json(&json!({
            "message": "hi",
            "history": [{ "role": "system", "content": "x" }, { "content": 7 }]
        }))
        .unwrap();
        assert_eq!(
            req.history,
            vec![ChatMessage::assistant("x"), ChatMessage::assistant("7")]
        );
    }
}
