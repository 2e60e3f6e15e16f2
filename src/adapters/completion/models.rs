//! Chat-completions wire format (OpenAI-compatible subset).

use serde::{Deserialize, Serialize};

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    /// Model identifier, e.g. `openai/gpt-4o-mini`.
    pub model: &'a str,
    /// Conversation so far; a single user turn here.
    pub messages: Vec<ChatMessage<'a>>,
    /// Completion length cap; omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// One outgoing chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    /// `user`, `system` or `assistant`.
    pub role: &'static str,
    /// Message text.
    pub content: &'a str,
}

/// Response body. Every level is optional so a malformed payload is
/// reported by [`ChatResponse::first_content`] rather than by serde.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    /// Candidate completions; only the first is used.
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

/// One candidate completion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    /// Generated message.
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

/// Message inside a choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    /// Generated text.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// `choices[0].message.content`, trimmed.
    pub fn first_content(&self) -> Result<String, &'static str> {
        let choices = self.choices.as_ref().ok_or("response has no choices")?;
        let first = choices.first().ok_or("response has empty choices")?;
        let content = first
            .message
            .as_ref()
            .and_then(|m| m.content.as_deref())
            .ok_or("first choice has no message content")?;
        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> ChatResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_first_content_trims() {
        let response = parse(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "  Restart vm1.\n"}}]
        }));
        assert_eq!(response.first_content().unwrap(), "Restart vm1.");
    }

    #[test]
    fn test_first_content_errors() {
        assert!(parse(serde_json::json!({})).first_content().is_err());
        assert!(parse(serde_json::json!({"choices": []})).first_content().is_err());
        assert!(parse(serde_json::json!({"choices": [{"message": {}}]}))
            .first_content()
            .is_err());
    }

    #[test]
    fn test_request_omits_unset_max_tokens() {
        let request = ChatRequest {
            model: "m",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            max_tokens: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("max_tokens").is_none());
        assert_eq!(value["messages"][0]["role"], "user");
    }
}
