//! Multi-source context aggregation.
//!
//! Runs every registered [`SourceFetcher`] for a query and collects the
//! results into an [`AggregatedContext`]. Each fetch is bounded by a
//! per-source timeout and by the overall request deadline, whichever
//! comes first. Aggregation never fails: timeouts and missing fetchers
//! become failed sections.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::domain::errors::UpstreamError;
use crate::domain::models::{AggregatedContext, AggregatorConfig, Query, SourceBody, SourceKind};
use crate::domain::ports::SourceFetcher;

/// Fans a query out to all source fetchers.
pub struct ContextAggregator {
    fetchers: Vec<Arc<dyn SourceFetcher>>,
    concurrent: bool,
    source_timeout: Duration,
    request_deadline: Duration,
}

impl ContextAggregator {
    /// Create an aggregator with default budgets.
    pub fn new(fetchers: Vec<Arc<dyn SourceFetcher>>) -> Self {
        Self::with_config(fetchers, &AggregatorConfig::default())
    }

    /// Create an aggregator with budgets from configuration.
    pub fn with_config(fetchers: Vec<Arc<dyn SourceFetcher>>, config: &AggregatorConfig) -> Self {
        Self {
            fetchers,
            concurrent: config.concurrent,
            source_timeout: Duration::from_secs(config.source_timeout_secs),
            request_deadline: Duration::from_secs(config.request_deadline_secs),
        }
    }

    /// Override the per-source and overall budgets.
    pub const fn with_budgets(mut self, source_timeout: Duration, request_deadline: Duration) -> Self {
        self.source_timeout = source_timeout;
        self.request_deadline = request_deadline;
        self
    }

    /// Run fetchers one after another in registration order.
    pub const fn sequential(mut self) -> Self {
        self.concurrent = false;
        self
    }

    /// Fetch all sources for `query`.
    pub async fn aggregate(&self, query: &Query) -> AggregatedContext {
        let request_id = Uuid::new_v4();
        let span = info_span!("aggregate", %request_id, concurrent = self.concurrent);

        async {
            let deadline = Instant::now() + self.request_deadline;

            let bodies = if self.concurrent {
                join_all(
                    self.fetchers
                        .iter()
                        .map(|fetcher| self.fetch_bounded(fetcher.as_ref(), query, deadline)),
                )
                .await
            } else {
                let mut bodies = Vec::with_capacity(self.fetchers.len());
                for fetcher in &self.fetchers {
                    bodies.push(self.fetch_bounded(fetcher.as_ref(), query, deadline).await);
                }
                bodies
            };

            let context = AggregatedContext::from_bodies(bodies);
            info!(failures = context.failure_count(), "context aggregated");
            context
        }
        .instrument(span)
        .await
    }

    async fn fetch_bounded(
        &self,
        fetcher: &dyn SourceFetcher,
        query: &Query,
        deadline: Instant,
    ) -> (SourceKind, SourceBody) {
        let kind = fetcher.kind();
        let started = Instant::now();
        let bound = deadline.min(started + self.source_timeout);

        let body = timeout_at(bound, fetcher.fetch(query))
            .await
            .unwrap_or_else(|_| SourceBody::Failed(UpstreamError::timeout(started.elapsed())));

        debug!(
            source = %kind,
            status = body.status(),
            error_kind = body.error_kind(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "source fetched"
        );
        (kind, body)
    }
}
