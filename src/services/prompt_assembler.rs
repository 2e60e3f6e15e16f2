//! Prompt assembly.

use crate::domain::models::{AggregatedContext, PromptConfig, Query};

use super::context_truncation::truncate_labeled;

const PREAMBLE: &str = "You are an intelligent assistant analyzing customer infrastructure.";
const CLOSING: &str = "Provide a summary and actionable insights.";

/// Interleaves the query and each labeled source section into one prompt.
///
/// The output depends only on its inputs: no timestamps, no randomness.
#[derive(Debug, Clone, Default)]
pub struct PromptAssembler {
    max_section_chars: Option<usize>,
}

impl PromptAssembler {
    /// Create an assembler capping each section at `max_section_chars`
    /// characters (`None` disables truncation).
    pub const fn new(max_section_chars: Option<usize>) -> Self {
        Self { max_section_chars }
    }

    /// Create an assembler from configuration.
    pub const fn from_config(config: &PromptConfig) -> Self {
        Self::new(config.max_section_chars)
    }

    /// Build the prompt text.
    pub fn assemble(&self, query: &Query, context: &AggregatedContext) -> String {
        let mut prompt = format!("{PREAMBLE}\n\nCustomer Query: {query}\n\n");
        for section in context.sections() {
            let body = truncate_labeled(section.label, &section.render(), self.max_section_chars);
            prompt.push_str(&format!("--- {} ---\n{body}\n\n", section.label));
        }
        prompt.push_str(CLOSING);
        prompt
    }
}
