//! Completion replies.

use serde::Serialize;

use super::context::AggregatedContext;
use super::query::Query;
use crate::domain::errors::UpstreamError;

/// Reply from the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum CompletionReply {
    /// The model's answer text.
    Answer(String),
    /// The completion call failed.
    Failed(UpstreamError),
}

impl CompletionReply {
    /// Render the reply as display text. Failures become an error line.
    pub fn render(&self) -> String {
        match self {
            Self::Answer(text) => text.clone(),
            Self::Failed(err) => format!("Error communicating with the completion endpoint: {err}"),
        }
    }

    /// Whether the completion call failed.
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl From<Result<String, UpstreamError>> for CompletionReply {
    fn from(result: Result<String, UpstreamError>) -> Self {
        match result {
            Ok(text) => Self::Answer(text),
            Err(err) => Self::Failed(err),
        }
    }
}

/// Everything produced by one request cycle.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    /// The user query.
    pub query: Query,
    /// Per-source sections.
    pub context: AggregatedContext,
    /// The prompt sent to the completion endpoint.
    pub prompt: String,
    /// The completion result.
    pub reply: CompletionReply,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_reply_renders_error_text() {
        let reply = CompletionReply::from(Err(UpstreamError::parse("response has no choices")));
        assert!(reply.is_failed());
        assert!(reply.render().contains("response has no choices"));
    }

    #[test]
    fn test_answer_renders_verbatim() {
        let reply = CompletionReply::from(Ok("All good.".to_string()));
        assert_eq!(reply.render(), "All good.");
    }
}
