//! Pipeline status fetcher.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::UpstreamError;
use crate::domain::models::{
    PipelineLookup, Query, SourceBody, SourceKind, NO_PIPELINES_FOUND, NO_PIPELINE_ID,
};
use crate::domain::ports::SourceFetcher;

use super::client::GitLabClient;

/// Reports the status of one CI pipeline.
///
/// In [`PipelineLookup::Latest`] mode this is the project's most recent
/// pipeline. In [`PipelineLookup::FromQuery`] mode the pipeline ID is taken
/// from the query text; no request is made when the query carries none.
pub struct PipelineFetcher {
    client: Arc<GitLabClient>,
    lookup: PipelineLookup,
}

impl PipelineFetcher {
    /// Create a fetcher using `lookup` to pick the pipeline.
    pub const fn new(client: Arc<GitLabClient>, lookup: PipelineLookup) -> Self {
        Self { client, lookup }
    }

    async fn collect(&self, query: &Query) -> Result<SourceBody, UpstreamError> {
        let pipeline = match self.lookup {
            PipelineLookup::Latest => match self.client.latest_pipeline().await? {
                Some(pipeline) => pipeline,
                None => return Ok(SourceBody::not_found(NO_PIPELINES_FOUND)),
            },
            PipelineLookup::FromQuery => {
                let Some(pipeline_id) = query.pipeline_id() else {
                    debug!("query carries no pipeline ID");
                    return Ok(SourceBody::not_found(NO_PIPELINE_ID));
                };
                self.client.pipeline(pipeline_id).await?
            }
        };
        Ok(SourceBody::Data(pipeline.summary_line()))
    }
}

#[async_trait]
impl SourceFetcher for PipelineFetcher {
    fn kind(&self) -> SourceKind {
        SourceKind::Pipelines
    }

    async fn fetch(&self, query: &Query) -> SourceBody {
        self.collect(query).await.into()
    }
}
