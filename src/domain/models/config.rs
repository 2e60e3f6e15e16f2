use serde::{Deserialize, Deserializer, Serialize};

use super::secret::Secret;

/// Main configuration structure for Unified AI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Compute provider (Azure Resource Manager) settings
    #[serde(default)]
    pub azure: AzureConfig,

    /// Ticketing system (ServiceNow) settings
    #[serde(default)]
    pub servicenow: ServiceNowConfig,

    /// CI system (GitLab) settings
    #[serde(default)]
    pub gitlab: GitLabConfig,

    /// Completion endpoint (OpenRouter) settings
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Fan-out and deadline settings
    #[serde(default)]
    pub aggregator: AggregatorConfig,

    /// Prompt assembly settings
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Azure Resource Manager configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AzureConfig {
    /// Management endpoint base URL
    #[serde(default = "default_azure_management_url")]
    pub management_url: String,

    /// Bearer token (can also be set via `AZURE_ACCESS_TOKEN`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<Secret>,

    /// Subscription holding the monitored resource group
    #[serde(default, deserialize_with = "string_or_number")]
    pub subscription_id: String,

    /// Resource group whose virtual machines are listed
    #[serde(default, deserialize_with = "string_or_number")]
    pub resource_group: String,

    /// Virtual machine whose metrics are sampled
    #[serde(default, deserialize_with = "string_or_number")]
    pub vm_name: String,

    /// Compute API version for list and instance view calls
    #[serde(default = "default_compute_api_version")]
    pub compute_api_version: String,

    /// Metrics query settings
    #[serde(default)]
    pub metrics: MetricsConfig,
}

fn default_azure_management_url() -> String {
    "https://management.azure.com".to_string()
}

fn default_compute_api_version() -> String {
    "2021-07-01".to_string()
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            management_url: default_azure_management_url(),
            access_token: None,
            subscription_id: String::new(),
            resource_group: String::new(),
            vm_name: String::new(),
            compute_api_version: default_compute_api_version(),
            metrics: MetricsConfig::default(),
        }
    }
}

/// Azure Monitor metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricsConfig {
    /// Trailing window length in minutes (5-1440)
    #[serde(default = "default_window_minutes")]
    pub window_minutes: u32,

    /// Metric names to average, e.g. "Percentage CPU"
    #[serde(default = "default_metric_names")]
    pub metric_names: Vec<String>,

    /// Monitor API version
    #[serde(default = "default_metrics_api_version")]
    pub api_version: String,
}

const fn default_window_minutes() -> u32 {
    60
}

fn default_metric_names() -> Vec<String> {
    vec!["Percentage CPU".to_string()]
}

fn default_metrics_api_version() -> String {
    "2018-01-01".to_string()
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            window_minutes: default_window_minutes(),
            metric_names: default_metric_names(),
            api_version: default_metrics_api_version(),
        }
    }
}

/// ServiceNow Table API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServiceNowConfig {
    /// Instance URL, e.g. `https://dev00000.service-now.com`
    #[serde(default)]
    pub instance_url: String,

    /// Basic auth user
    #[serde(default, deserialize_with = "string_or_number")]
    pub username: String,

    /// Basic auth password (can also be set via `SNOW_PASSWORD`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<Secret>,

    /// Table searched for tickets
    #[serde(default = "default_snow_table")]
    pub table: String,

    /// Maximum tickets returned (1-100)
    #[serde(default = "default_snow_limit")]
    pub limit: u32,
}

fn default_snow_table() -> String {
    "incident".to_string()
}

const fn default_snow_limit() -> u32 {
    5
}

impl Default for ServiceNowConfig {
    fn default() -> Self {
        Self {
            instance_url: String::new(),
            username: String::new(),
            password: None,
            table: default_snow_table(),
            limit: default_snow_limit(),
        }
    }
}

/// How the pipeline section picks a pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineLookup {
    /// Most recent pipeline of the configured project
    #[default]
    Latest,
    /// Pipeline whose ID appears in the query text
    FromQuery,
}

/// GitLab API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitLabConfig {
    /// GitLab base URL
    #[serde(default = "default_gitlab_url")]
    pub base_url: String,

    /// Private token (can also be set via `GITLAB_TOKEN`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<Secret>,

    /// Numeric or URL-encoded path project ID
    #[serde(default, deserialize_with = "string_or_number")]
    pub project_id: String,

    /// Pipeline lookup mode
    #[serde(default)]
    pub lookup: PipelineLookup,
}

/// Accept identifiers written as strings or as bare numbers.
///
/// YAML `project_id: 12345678` and `UNIFIED_AI_GITLAB__PROJECT_ID=12345678`
/// both reach serde as integers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Identifier {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match Identifier::deserialize(deserializer)? {
        Identifier::Text(text) => text,
        Identifier::Unsigned(n) => n.to_string(),
        Identifier::Signed(n) => n.to_string(),
    })
}

fn default_gitlab_url() -> String {
    "https://gitlab.com".to_string()
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            base_url: default_gitlab_url(),
            token: None,
            project_id: String::new(),
            lookup: PipelineLookup::default(),
        }
    }
}

/// Chat-completions endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompletionConfig {
    /// API base URL (the `/chat/completions` path is appended)
    #[serde(default = "default_completion_url")]
    pub base_url: String,

    /// API key (can also be set via `OPENROUTER_KEY`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Secret>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Completion token cap; `null` lets the endpoint decide
    #[serde(default = "default_max_tokens")]
    pub max_tokens: Option<u32>,

    /// Optional `HTTP-Referer` attribution header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,

    /// Optional `X-Title` attribution header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

fn default_completion_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "mistralai/mistral-7b-instruct".to_string()
}

#[allow(clippy::unnecessary_wraps)]
const fn default_max_tokens() -> Option<u32> {
    Some(300)
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_completion_url(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            referer: None,
            title: None,
        }
    }
}

/// Shared HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpConfig {
    /// Per-call timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_http_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("unified-ai/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Source fan-out configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AggregatorConfig {
    /// Run source fetchers concurrently (false keeps the fixed sequential order)
    #[serde(default = "default_true")]
    pub concurrent: bool,

    /// Budget for a single source, in seconds
    #[serde(default = "default_source_timeout")]
    pub source_timeout_secs: u64,

    /// Budget for the whole fan-out, in seconds
    #[serde(default = "default_request_deadline")]
    pub request_deadline_secs: u64,
}

const fn default_true() -> bool {
    true
}

const fn default_source_timeout() -> u64 {
    45
}

const fn default_request_deadline() -> u64 {
    60
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            concurrent: default_true(),
            source_timeout_secs: default_source_timeout(),
            request_deadline_secs: default_request_deadline(),
        }
    }
}

/// Prompt assembly configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PromptConfig {
    /// Per-section character cap; `null` disables truncation
    #[serde(default = "default_max_section_chars")]
    pub max_section_chars: Option<usize>,
}

#[allow(clippy::unnecessary_wraps)]
const fn default_max_section_chars() -> Option<usize> {
    Some(8_000)
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_section_chars: default_max_section_chars(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json, pretty or compact
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files (stderr only when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_identifiers_are_accepted() {
        let yaml = "azure:\n  subscription_id: 42\n  vm_name: 7\nservicenow:\n  username: 1001\ngitlab:\n  project_id: 12345678\n";
        let config: Config = serde_yaml::from_str(yaml).expect("numeric identifiers should parse");

        assert_eq!(config.gitlab.project_id, "12345678");
        assert_eq!(config.azure.subscription_id, "42");
        assert_eq!(config.azure.vm_name, "7");
        assert_eq!(config.servicenow.username, "1001");
    }

    #[test]
    fn test_quoted_identifier_kept_verbatim() {
        let config: Config =
            serde_yaml::from_str("gitlab:\n  project_id: 'group/app'\n").expect("should parse");
        assert_eq!(config.gitlab.project_id, "group/app");
    }
}
