//! The request cycle: aggregate, assemble, complete.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use crate::adapters::completion::create_completion_client;
use crate::adapters::plugins::create_source_fetchers;
use crate::domain::errors::UpstreamError;
use crate::domain::models::{AggregatedContext, AssistantReply, CompletionReply, Config, Query};
use crate::domain::ports::CompletionClient;
use crate::infrastructure::http::HttpClient;

use super::context_aggregator::ContextAggregator;
use super::prompt_assembler::PromptAssembler;

/// Context and prompt for a query, without a completion call.
#[derive(Debug, Clone, Serialize)]
pub struct PromptPreview {
    /// The user query.
    pub query: Query,
    /// Per-source sections.
    pub context: AggregatedContext,
    /// The prompt that would be sent.
    pub prompt: String,
}

/// Answers queries using live infrastructure context.
pub struct AssistantService {
    aggregator: ContextAggregator,
    assembler: PromptAssembler,
    completion: Arc<dyn CompletionClient>,
}

impl AssistantService {
    /// Assemble a service from its parts.
    pub fn new(
        aggregator: ContextAggregator,
        assembler: PromptAssembler,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            aggregator,
            assembler,
            completion,
        }
    }

    /// Wire the HTTP client, all four fetchers and the completion client
    /// from configuration.
    ///
    /// Only fails when the HTTP client itself cannot be built; missing
    /// credentials surface later as failed sections or a failed reply.
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        let http = HttpClient::new(&config.http)?;
        let fetchers = create_source_fetchers(config, &http);
        Ok(Self::new(
            ContextAggregator::with_config(fetchers, &config.aggregator),
            PromptAssembler::from_config(&config.prompt),
            create_completion_client(&config.completion, &http),
        ))
    }

    /// Gather context and build the prompt (dry run).
    pub async fn preview(&self, query: &Query) -> PromptPreview {
        let context = self.aggregator.aggregate(query).await;
        let prompt = self.assembler.assemble(query, &context);
        PromptPreview {
            query: query.clone(),
            context,
            prompt,
        }
    }

    /// Run one full request cycle. Calls the completion endpoint exactly
    /// once and never fails: upstream errors are folded into the reply.
    #[instrument(skip(self), fields(model = %self.completion.model()))]
    pub async fn answer(&self, query: &Query) -> AssistantReply {
        let PromptPreview {
            query,
            context,
            prompt,
        } = self.preview(query).await;

        let reply = CompletionReply::from(self.completion.complete(&prompt).await);
        info!(
            failed_sources = context.failure_count(),
            completion_failed = reply.is_failed(),
            "query answered"
        );

        AssistantReply {
            query,
            context,
            prompt,
            reply,
        }
    }
}
