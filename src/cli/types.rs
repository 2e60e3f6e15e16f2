//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::{ask::AskArgs, config::ConfigArgs, interactive::InteractiveArgs, prompt::PromptArgs};

/// Top-level command line.
#[derive(Parser, Debug)]
#[command(name = "unified-ai")]
#[command(about = "Unified AI - infrastructure-aware assistant", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./unified-ai.yaml when present)
    #[arg(short, long, global = true, env = "UNIFIED_AI_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a single query using live infrastructure context
    Ask(AskArgs),

    /// Answer queries read line by line from stdin
    Interactive(InteractiveArgs),

    /// Print the assembled prompt without calling the completion endpoint
    Prompt(PromptArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigArgs),
}
