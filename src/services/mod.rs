//! Application services.

pub mod assistant;
pub mod context_aggregator;
pub mod context_truncation;
pub mod prompt_assembler;

pub use assistant::{AssistantService, PromptPreview};
pub use context_aggregator::ContextAggregator;
pub use prompt_assembler::PromptAssembler;
