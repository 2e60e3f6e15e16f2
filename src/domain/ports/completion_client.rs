//! Completion client port - interface for hosted language models.

use async_trait::async_trait;

use crate::domain::errors::UpstreamError;

/// Port for sending a single-turn prompt to a language model.
///
/// There is no conversation state: every call carries one user message and
/// returns the text of the first choice.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model identifier the client sends.
    fn model(&self) -> &str;

    /// Send `prompt` and return the reply text.
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError>;
}
