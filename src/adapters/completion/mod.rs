//! Completion endpoint adapters.

pub mod models;
pub mod openrouter;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::errors::UpstreamError;
use crate::domain::models::CompletionConfig;
use crate::domain::ports::CompletionClient;
use crate::infrastructure::http::HttpClient;

pub use openrouter::OpenRouterClient;

/// Completion client whose construction failed; every call reports why.
pub struct UnavailableCompletion {
    model: String,
    error: UpstreamError,
}

#[async_trait]
impl CompletionClient for UnavailableCompletion {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, _prompt: &str) -> Result<String, UpstreamError> {
        Err(self.error.clone())
    }
}

/// Build the configured completion client, or a stand-in reporting the
/// construction error on each call.
pub fn create_completion_client(
    config: &CompletionConfig,
    http: &HttpClient,
) -> Arc<dyn CompletionClient> {
    match OpenRouterClient::new(http.clone(), config) {
        Ok(client) => Arc::new(client),
        Err(error) => {
            warn!(error = %error, "completion endpoint unavailable");
            Arc::new(UnavailableCompletion {
                model: config.model.clone(),
                error,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::HttpConfig;

    #[tokio::test]
    async fn test_missing_key_reports_not_configured() {
        let http = HttpClient::new(&HttpConfig::default()).unwrap();
        let client = create_completion_client(&CompletionConfig::default(), &http);

        assert_eq!(client.model(), "mistralai/mistral-7b-instruct");
        let err = client.complete("hello").await.unwrap_err();
        assert!(matches!(err, UpstreamError::NotConfigured { .. }));
    }
}
