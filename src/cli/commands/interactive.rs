//! Implementation of the `unified-ai interactive` command.
//!
//! Reads one query per line until EOF or `exit`/`quit`. Blank lines are
//! skipped and each answer is printed before the next line is read.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::cli::output::progress::spinner_with_message;
use crate::cli::output::CommandOutput;
use crate::domain::models::Query;
use crate::services::AssistantService;

use super::ask::AskOutput;

/// Arguments for `unified-ai interactive`.
#[derive(Args, Debug)]
pub struct InteractiveArgs {
    /// Print a per-source status table with each answer
    #[arg(long)]
    pub sources: bool,
}

/// Run the interactive loop on stdin and stdout.
pub async fn execute(args: InteractiveArgs, service: &AssistantService, json_mode: bool) -> Result<()> {
    if !json_mode {
        eprintln!("Enter a query (\"exit\" to quit).");
    }
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_session(service, stdin, &mut stdout, args.sources, json_mode).await?;
    Ok(())
}

/// Answer every query line from `input`, writing answers to `out`.
///
/// Returns the number of queries answered.
pub async fn run_session<R, W>(
    service: &AssistantService,
    input: R,
    out: &mut W,
    show_sources: bool,
    json_mode: bool,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut answered = 0;

    while let Some(line) = lines.next_line().await.context("Failed to read query")? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("exit") || text.eq_ignore_ascii_case("quit") {
            break;
        }
        let Ok(query) = Query::parse(text) else {
            continue;
        };

        let spinner = spinner_with_message("Analyzing data sources...", !json_mode);
        let reply = service.answer(&query).await;
        spinner.finish_and_clear();

        let rendered = AskOutput {
            reply,
            show_prompt: false,
            show_sources,
        };
        if json_mode {
            writeln!(out, "{}", serde_json::to_string(&rendered.to_json())?)?;
        } else {
            writeln!(out, "{}\n", rendered.to_human())?;
        }
        answered += 1;
    }

    Ok(answered)
}
