//! Implementation of the `unified-ai ask` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::progress::{spinner_with_message, ProgressBarExt};
use crate::cli::output::table::TableFormatter;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::AssistantReply;
use crate::services::AssistantService;

use super::parse_query;

/// Arguments for `unified-ai ask`.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question, e.g. `why is pipeline #482913 failing`
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Also print the assembled prompt
    #[arg(long)]
    pub show_prompt: bool,

    /// Also print a per-source status table
    #[arg(long)]
    pub sources: bool,
}

impl AskArgs {
    /// The query words joined with spaces.
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

/// Result of one answered query.
#[derive(Debug, Serialize)]
pub struct AskOutput {
    /// The reply and its context.
    #[serde(flatten)]
    pub reply: AssistantReply,
    /// Include the prompt in text output.
    #[serde(skip)]
    pub show_prompt: bool,
    /// Include the source table in text output.
    #[serde(skip)]
    pub show_sources: bool,
}

impl CommandOutput for AskOutput {
    fn to_human(&self) -> String {
        let mut blocks = Vec::new();
        if self.show_sources {
            blocks.push(TableFormatter::new().format_sources(&self.reply.context));
        }
        if self.show_prompt {
            blocks.push(format!("Prompt:\n{}", self.reply.prompt));
        }
        blocks.push(format!("Unified AI Response:\n{}", self.reply.reply.render()));
        blocks.join("\n\n")
    }
}

/// Run `unified-ai ask`.
pub async fn execute(args: AskArgs, service: &AssistantService, json_mode: bool) -> Result<()> {
    let query = parse_query(&args.query)?;

    let spinner = spinner_with_message("Analyzing data sources...", !json_mode);
    let reply = service.answer(&query).await;
    if reply.reply.is_failed() || reply.context.failure_count() > 0 {
        spinner.finish_warning("Completed with errors");
    } else {
        spinner.finish_success("Done");
    }

    output(
        &AskOutput {
            reply,
            show_prompt: args.show_prompt,
            show_sources: args.sources,
        },
        json_mode,
    );
    Ok(())
}
