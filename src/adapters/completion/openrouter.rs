//! OpenRouter chat-completions client.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::domain::errors::UpstreamError;
use crate::domain::models::{CompletionConfig, Secret};
use crate::domain::ports::CompletionClient;
use crate::infrastructure::http::{Auth, HttpClient};

use super::models::{ChatMessage, ChatRequest, ChatResponse};

/// Sends a single user message to `{base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: HttpClient,
    api_key: Secret,
    endpoint: String,
    model: String,
    max_tokens: Option<u32>,
    /// Optional attribution headers (`HTTP-Referer`, `X-Title`).
    headers: Vec<(&'static str, String)>,
}

impl OpenRouterClient {
    /// Create a client from configuration.
    ///
    /// Returns `NotConfigured` if no API key is set.
    pub fn new(http: HttpClient, config: &CompletionConfig) -> Result<Self, UpstreamError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| UpstreamError::not_configured("completion.api_key is not set"))?;

        let mut headers = Vec::new();
        if let Some(referer) = &config.referer {
            headers.push(("HTTP-Referer", referer.clone()));
        }
        if let Some(title) = &config.title {
            headers.push(("X-Title", title.clone()));
        }

        Ok(Self {
            http,
            api_key,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            headers,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_chars = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        let response: ChatResponse = self
            .http
            .post_json(
                &self.endpoint,
                &Auth::Bearer(self.api_key.clone()),
                &self.headers,
                &request,
            )
            .await?
            .into_success_json()?;

        let content = response.first_content().map_err(UpstreamError::parse)?;
        debug!(reply_chars = content.len(), "completion received");
        Ok(content)
    }
}
