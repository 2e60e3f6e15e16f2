//! Incident ticket search fetcher.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::UpstreamError;
use crate::domain::models::{Query, SourceBody, SourceKind, NO_INCIDENTS_FOUND};
use crate::domain::ports::SourceFetcher;

use super::client::ServiceNowClient;

/// Finds incidents whose short description contains the query text.
pub struct TicketSearchFetcher {
    client: Arc<ServiceNowClient>,
    limit: u32,
}

impl TicketSearchFetcher {
    /// Create a fetcher returning at most `limit` tickets.
    pub const fn new(client: Arc<ServiceNowClient>, limit: u32) -> Self {
        Self { client, limit }
    }

    async fn collect(&self, query: &Query) -> Result<SourceBody, UpstreamError> {
        let incidents = self
            .client
            .search_short_description(query.as_str(), self.limit)
            .await?;

        debug!(matches = incidents.len(), "ticket search finished");
        if incidents.is_empty() {
            return Ok(SourceBody::not_found(NO_INCIDENTS_FOUND));
        }

        let lines: Vec<String> = incidents
            .iter()
            .take(self.limit as usize)
            .map(|incident| incident.summary_line())
            .collect();
        Ok(SourceBody::Data(lines.join("\n")))
    }
}

#[async_trait]
impl SourceFetcher for TicketSearchFetcher {
    fn kind(&self) -> SourceKind {
        SourceKind::Tickets
    }

    async fn fetch(&self, query: &Query) -> SourceBody {
        self.collect(query).await.into()
    }
}
