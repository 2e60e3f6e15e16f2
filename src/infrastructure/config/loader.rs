use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::Secret;

/// Default project config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "unified-ai.yaml";

/// Optional local overrides, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "unified-ai.local.yaml";

/// Prefix for environment overrides, e.g. `UNIFIED_AI_GITLAB__PROJECT_ID`.
pub const ENV_PREFIX: &str = "UNIFIED_AI_";

/// Configuration error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required value is unset or blank.
    #[error("Missing required configuration value: {0}")]
    MissingValue(&'static str),

    /// Metrics window outside 5..=1440 minutes.
    #[error("Invalid metrics window: {0} minutes. Must be between 5 and 1440")]
    InvalidMetricsWindow(u32),

    /// Every configured metric name is blank.
    #[error("At least one metric name is required")]
    NoMetricNames,

    /// Ticket limit outside 1..=100.
    #[error("Invalid ticket limit: {0}. Must be between 1 and 100")]
    InvalidTicketLimit(u32),

    /// `max_tokens` set to zero.
    #[error("Invalid max_tokens: {0}. Must be at least 1")]
    InvalidMaxTokens(u32),

    /// A timeout or deadline set to zero.
    #[error("Invalid {0}: must be at least 1 second")]
    InvalidTimeout(&'static str),

    /// Per-source timeout longer than the request deadline.
    #[error(
        "Invalid aggregator budget: source_timeout_secs ({0}) must not exceed request_deadline_secs ({1})"
    )]
    InvalidDeadline(u64, u64),

    /// Section cap below 100 characters.
    #[error("Invalid max_section_chars: {0}. Must be at least 100")]
    InvalidSectionCap(usize),

    /// Unknown log level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown log format.
    #[error("Invalid log format: {0}. Must be one of: json, pretty, compact")]
    InvalidLogFormat(String),

    /// Unknown log rotation policy.
    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    /// A base URL that does not parse as http(s).
    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl {
        /// Configuration key.
        field: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `unified-ai.yaml`, or the explicit `path` when given
    /// 3. `unified-ai.local.yaml` (local overrides, optional)
    /// 4. Environment variables (`UNIFIED_AI_*` prefix, highest priority)
    ///
    /// Secrets still unset afterwards fall back to the conventional
    /// variables `AZURE_ACCESS_TOKEN`, `SNOW_PASSWORD`, `GITLAB_TOKEN` and
    /// `OPENROUTER_KEY`.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let primary = path.map_or_else(|| Path::new(DEFAULT_CONFIG_FILE).to_path_buf(), Path::to_path_buf);
        if path.is_some() && !primary.exists() {
            anyhow::bail!("Config file not found: {}", primary.display());
        }

        let mut config: Config = Figment::new()
            // 1. Start with programmatic defaults
            .merge(Serialized::defaults(Config::default()))
            // 2. Merge project config
            .merge(Yaml::file(&primary))
            // 3. Merge local overrides
            .merge(Yaml::file(LOCAL_CONFIG_FILE))
            // 4. Merge environment variables (highest priority)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::apply_secret_fallbacks(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Fill unset secrets from their conventional environment variables
    pub fn apply_secret_fallbacks(config: &mut Config) {
        fill_from_env(&mut config.azure.access_token, "AZURE_ACCESS_TOKEN");
        fill_from_env(&mut config.servicenow.password, "SNOW_PASSWORD");
        fill_from_env(&mut config.gitlab.token, "GITLAB_TOKEN");
        fill_from_env(&mut config.completion.api_key, "OPENROUTER_KEY");
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Azure
        require_url("azure.management_url", &config.azure.management_url)?;
        require_secret("azure.access_token", config.azure.access_token.as_ref())?;
        require("azure.subscription_id", &config.azure.subscription_id)?;
        require("azure.resource_group", &config.azure.resource_group)?;
        require("azure.vm_name", &config.azure.vm_name)?;

        let window = config.azure.metrics.window_minutes;
        if !(5..=1440).contains(&window) {
            return Err(ConfigError::InvalidMetricsWindow(window));
        }
        if config
            .azure
            .metrics
            .metric_names
            .iter()
            .all(|name| name.trim().is_empty())
        {
            return Err(ConfigError::NoMetricNames);
        }

        // ServiceNow
        require_url("servicenow.instance_url", &config.servicenow.instance_url)?;
        require("servicenow.username", &config.servicenow.username)?;
        require_secret("servicenow.password", config.servicenow.password.as_ref())?;
        require("servicenow.table", &config.servicenow.table)?;
        if !(1..=100).contains(&config.servicenow.limit) {
            return Err(ConfigError::InvalidTicketLimit(config.servicenow.limit));
        }

        // GitLab
        require_url("gitlab.base_url", &config.gitlab.base_url)?;
        require_secret("gitlab.token", config.gitlab.token.as_ref())?;
        require("gitlab.project_id", &config.gitlab.project_id)?;

        // Completion endpoint
        require_url("completion.base_url", &config.completion.base_url)?;
        require_secret("completion.api_key", config.completion.api_key.as_ref())?;
        require("completion.model", &config.completion.model)?;
        if config.completion.max_tokens == Some(0) {
            return Err(ConfigError::InvalidMaxTokens(0));
        }

        // Budgets
        if config.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("http.timeout_secs"));
        }
        if config.aggregator.source_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("aggregator.source_timeout_secs"));
        }
        if config.aggregator.request_deadline_secs == 0 {
            return Err(ConfigError::InvalidTimeout("aggregator.request_deadline_secs"));
        }
        if config.aggregator.source_timeout_secs > config.aggregator.request_deadline_secs {
            return Err(ConfigError::InvalidDeadline(
                config.aggregator.source_timeout_secs,
                config.aggregator.request_deadline_secs,
            ));
        }
        if let Some(cap) = config.prompt.max_section_chars {
            if cap < 100 {
                return Err(ConfigError::InvalidSectionCap(cap));
            }
        }

        // Logging
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty", "compact"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        Ok(())
    }
}

fn fill_from_env(slot: &mut Option<Secret>, var: &str) {
    if slot.as_ref().is_some_and(|s| !s.is_empty()) {
        return;
    }
    if let Ok(value) = std::env::var(var) {
        if !value.trim().is_empty() {
            *slot = Some(Secret::new(value));
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingValue(field));
    }
    Ok(())
}

fn require_secret(field: &'static str, value: Option<&Secret>) -> Result<(), ConfigError> {
    match value {
        Some(secret) if !secret.is_empty() => Ok(()),
        _ => Err(ConfigError::MissingValue(field)),
    }
}

fn require_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    require(field, value)?;
    if reqwest::Url::parse(value).is_err() || !value.starts_with("http") {
        return Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
