//! Implementation of the `unified-ai prompt` command (dry run).

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::progress::spinner_with_message;
use crate::cli::output::{output, CommandOutput};
use crate::services::{AssistantService, PromptPreview};

use super::parse_query;

/// Arguments for `unified-ai prompt`.
#[derive(Args, Debug)]
pub struct PromptArgs {
    /// The question to build a prompt for
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

/// Assembled prompt without a completion call.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct PromptOutput(pub PromptPreview);

impl CommandOutput for PromptOutput {
    fn to_human(&self) -> String {
        self.0.prompt.clone()
    }
}

/// Run `unified-ai prompt`.
pub async fn execute(args: PromptArgs, service: &AssistantService, json_mode: bool) -> Result<()> {
    let query = parse_query(&args.query)?;

    let spinner = spinner_with_message("Analyzing data sources...", !json_mode);
    let preview = service.preview(&query).await;
    spinner.finish_and_clear();

    output(&PromptOutput(preview), json_mode);
    Ok(())
}
