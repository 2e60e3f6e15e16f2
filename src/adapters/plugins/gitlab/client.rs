//! GitLab REST API client.

use tracing::instrument;

use crate::domain::errors::UpstreamError;
use crate::domain::models::GitLabConfig;
use crate::infrastructure::http::{Auth, HttpClient};

use super::models::Pipeline;

/// HTTP client for the GitLab pipelines API.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: HttpClient,
    auth: Auth,
    /// `{base}/api/v4/projects/{encoded project}`
    project_url: String,
}

impl GitLabClient {
    /// Create a client from configuration.
    ///
    /// Returns `NotConfigured` if no token is set.
    pub fn new(http: HttpClient, config: &GitLabConfig) -> Result<Self, UpstreamError> {
        let token = config
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| UpstreamError::not_configured("gitlab.token is not set"))?;

        Ok(Self {
            http,
            auth: Auth::Header {
                name: "PRIVATE-TOKEN",
                value: token,
            },
            project_url: format!(
                "{}/api/v4/projects/{}",
                config.base_url.trim_end_matches('/'),
                encode_project_id(&config.project_id)
            ),
        })
    }

    /// The most recent pipeline, if the project has any.
    #[instrument(skip(self))]
    pub async fn latest_pipeline(&self) -> Result<Option<Pipeline>, UpstreamError> {
        let url = format!("{}/pipelines", self.project_url);
        let params = [("per_page", "1".to_string())];
        let pipelines: Vec<Pipeline> = self
            .http
            .get(&url, &self.auth, &params)
            .await?
            .into_success_json()?;
        Ok(pipelines.into_iter().next())
    }

    /// A single pipeline by ID.
    #[instrument(skip(self))]
    pub async fn pipeline(&self, pipeline_id: &str) -> Result<Pipeline, UpstreamError> {
        let url = format!("{}/pipelines/{pipeline_id}", self.project_url);
        self.http
            .get(&url, &self.auth, &[])
            .await?
            .into_success_json()
    }
}

/// Namespaced paths (`group/project`) must be URL-encoded; numeric IDs pass through.
fn encode_project_id(project_id: &str) -> String {
    project_id.trim().replace('/', "%2F")
}
