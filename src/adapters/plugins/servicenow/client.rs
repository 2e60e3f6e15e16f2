//! ServiceNow Table API client.

use tracing::instrument;

use crate::domain::errors::UpstreamError;
use crate::domain::models::ServiceNowConfig;
use crate::infrastructure::http::{Auth, HttpClient};

use super::models::{Incident, TableResponse};

/// Fields requested from the table; keeps responses small.
const INCIDENT_FIELDS: &str = "number,short_description,state";

/// HTTP client for the ServiceNow Table API.
#[derive(Debug, Clone)]
pub struct ServiceNowClient {
    /// Shared HTTP adapter.
    http: HttpClient,
    /// Basic auth credentials.
    auth: Auth,
    /// Instance URL, without trailing slash.
    instance_url: String,
    /// Table searched, usually `incident`.
    table: String,
}

impl ServiceNowClient {
    /// Create a client from configuration.
    ///
    /// Returns `NotConfigured` if no password is set.
    pub fn new(http: HttpClient, config: &ServiceNowConfig) -> Result<Self, UpstreamError> {
        let password = config
            .password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| UpstreamError::not_configured("servicenow.password is not set"))?;

        Ok(Self {
            http,
            auth: Auth::Basic {
                username: config.username.clone(),
                password,
            },
            instance_url: config.instance_url.trim_end_matches('/').to_string(),
            table: config.table.clone(),
        })
    }

    /// Search records whose short description contains `text`.
    #[instrument(skip(self))]
    pub async fn search_short_description(
        &self,
        text: &str,
        limit: u32,
    ) -> Result<Vec<Incident>, UpstreamError> {
        let url = format!("{}/api/now/table/{}", self.instance_url, self.table);
        let params = [
            ("sysparm_query", substring_query("short_description", text)),
            ("sysparm_limit", limit.to_string()),
            ("sysparm_fields", INCIDENT_FIELDS.to_string()),
            ("sysparm_display_value", "true".to_string()),
        ];

        let response: TableResponse = self
            .http
            .get(&url, &self.auth, &params)
            .await?
            .into_success_json()?;
        Ok(response.result)
    }
}

/// Encoded query matching `field` containing `text`.
///
/// `^` separates clauses in encoded queries; a literal caret is written `^^`.
pub fn substring_query(field: &str, text: &str) -> String {
    format!("{field}LIKE{}", text.replace('^', "^^"))
}
