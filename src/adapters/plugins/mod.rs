//! Native source plugins.
//!
//! Each sub-module corresponds to an external system (Azure, ServiceNow,
//! GitLab) and provides the fetchers that implement
//! [`SourceFetcher`] for it.

pub mod azure;
pub mod gitlab;
pub mod servicenow;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::errors::UpstreamError;
use crate::domain::models::{Config, Query, SourceBody, SourceKind};
use crate::domain::ports::SourceFetcher;
use crate::infrastructure::http::HttpClient;

use self::azure::{AzureClient, InstanceMetricsFetcher, InstanceStatusFetcher};
use self::gitlab::{GitLabClient, PipelineFetcher};
use self::servicenow::{ServiceNowClient, TicketSearchFetcher};

/// Stand-in for a source whose client could not be built, e.g. because a
/// credential is missing. Every fetch reports the construction error.
pub struct UnavailableFetcher {
    kind: SourceKind,
    error: UpstreamError,
}

impl UnavailableFetcher {
    /// Create a fetcher that always fails with `error`.
    pub const fn new(kind: SourceKind, error: UpstreamError) -> Self {
        Self { kind, error }
    }
}

#[async_trait]
impl SourceFetcher for UnavailableFetcher {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self, _query: &Query) -> SourceBody {
        SourceBody::Failed(self.error.clone())
    }
}

/// Build one fetcher per [`SourceKind`], in [`SourceKind::ALL`] order.
///
/// A source whose client cannot be created is replaced by an
/// [`UnavailableFetcher`], so a missing credential degrades one section
/// instead of failing the whole request. The two Azure fetchers share a
/// client.
pub fn create_source_fetchers(config: &Config, http: &HttpClient) -> Vec<Arc<dyn SourceFetcher>> {
    let azure = AzureClient::new(http.clone(), &config.azure).map(Arc::new);

    let status: Arc<dyn SourceFetcher> = match &azure {
        Ok(client) => Arc::new(InstanceStatusFetcher::new(Arc::clone(client))),
        Err(err) => unavailable(SourceKind::InstanceStatus, err.clone()),
    };

    let metrics: Arc<dyn SourceFetcher> = match &azure {
        Ok(client) => Arc::new(InstanceMetricsFetcher::new(
            Arc::clone(client),
            config.azure.vm_name.clone(),
            config.azure.metrics.metric_names.clone(),
            config.azure.metrics.window_minutes,
        )),
        Err(err) => unavailable(SourceKind::InstanceMetrics, err.clone()),
    };

    let tickets: Arc<dyn SourceFetcher> =
        match ServiceNowClient::new(http.clone(), &config.servicenow) {
            Ok(client) => Arc::new(TicketSearchFetcher::new(
                Arc::new(client),
                config.servicenow.limit,
            )),
            Err(err) => unavailable(SourceKind::Tickets, err),
        };

    let pipelines: Arc<dyn SourceFetcher> = match GitLabClient::new(http.clone(), &config.gitlab) {
        Ok(client) => Arc::new(PipelineFetcher::new(Arc::new(client), config.gitlab.lookup)),
        Err(err) => unavailable(SourceKind::Pipelines, err),
    };

    vec![status, metrics, tickets, pipelines]
}

fn unavailable(kind: SourceKind, error: UpstreamError) -> Arc<dyn SourceFetcher> {
    warn!(source = %kind, error = %error, "source unavailable");
    Arc::new(UnavailableFetcher::new(kind, error))
}
