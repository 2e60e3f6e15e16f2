//! Unified AI CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;

use unified_ai::cli::commands::{ask, config, interactive, prompt};
use unified_ai::cli::{handle_error, Cli, Commands};
use unified_ai::infrastructure::config::ConfigLoader;
use unified_ai::infrastructure::logging::{LogConfig, LoggerImpl};
use unified_ai::services::AssistantService;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Config(args) = &cli.command {
        return config::execute(args, cli.config.as_deref(), cli.json);
    }

    let settings =
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let log_config = LogConfig::try_from(&settings.logging)?;
    let _logger = LoggerImpl::init(&log_config)?;

    let service =
        AssistantService::from_config(&settings).context("Failed to initialize services")?;

    match cli.command {
        Commands::Ask(args) => ask::execute(args, &service, cli.json).await,
        Commands::Interactive(args) => interactive::execute(args, &service, cli.json).await,
        Commands::Prompt(args) => prompt::execute(args, &service, cli.json).await,
        Commands::Config(_) => Ok(()),
    }
}
