pub mod config;
pub mod context;
pub mod query;
pub mod reply;
pub mod secret;

pub use config::{
    AggregatorConfig, AzureConfig, CompletionConfig, Config, GitLabConfig, HttpConfig,
    LoggingConfig, MetricsConfig, PipelineLookup, PromptConfig, ServiceNowConfig,
};
pub use context::{
    AggregatedContext, SourceBody, SourceKind, SourceResult, NO_INCIDENTS_FOUND,
    NO_INSTANCES_FOUND, NO_METRIC_SAMPLES, NO_PIPELINES_FOUND, NO_PIPELINE_ID,
};
pub use query::Query;
pub use reply::{AssistantReply, CompletionReply};
pub use secret::Secret;
