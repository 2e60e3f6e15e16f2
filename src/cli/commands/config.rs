//! Implementation of the `unified-ai config` commands.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

/// `unified-ai config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigArgs {
    /// Load and validate configuration
    Check,
    /// Print the effective configuration with secrets redacted
    Show,
}

/// Outcome of `config check`.
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    /// Whether the configuration validated.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}

/// Effective configuration for `config show`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ShowOutput(pub Config);

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.0).unwrap_or_default()
    }
}

/// Run a `unified-ai config` subcommand.
pub fn execute(args: &ConfigArgs, path: Option<&Path>, json_mode: bool) -> Result<()> {
    let config = ConfigLoader::load(path).context("Configuration is invalid")?;

    match args {
        ConfigArgs::Check => output(
            &CheckOutput {
                success: true,
                message: "Configuration is valid".to_string(),
            },
            json_mode,
        ),
        ConfigArgs::Show => output(&ShowOutput(config), json_mode),
    }
    Ok(())
}
