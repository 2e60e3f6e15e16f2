//! Unified AI - infrastructure-aware assistant
//!
//! Answers a free-text query by gathering live context from several
//! upstream systems (Azure compute status and metrics, ServiceNow
//! incidents, GitLab pipelines), assembling it into one prompt and
//! sending that prompt to a chat-completions endpoint.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): request-cycle models and port traits
//! - **Adapter Layer** (`adapters`): source fetchers and the completion client
//! - **Service Layer** (`services`): aggregation, prompt assembly, the request cycle
//! - **Infrastructure Layer** (`infrastructure`): configuration, HTTP, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use unified_ai::{AssistantService, ConfigLoader, Query};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load(None)?;
//!     let service = AssistantService::from_config(&config)?;
//!     let reply = service.answer(&Query::parse("why is vm1 slow")?).await;
//!     println!("{}", reply.reply.render());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AggregatedContext, AssistantReply, CompletionReply, Config, Query, SourceBody, SourceKind,
    SourceResult,
};
pub use domain::ports::{CompletionClient, SourceFetcher};
pub use domain::{QueryError, UpstreamError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AssistantService, ContextAggregator, PromptAssembler, PromptPreview};
