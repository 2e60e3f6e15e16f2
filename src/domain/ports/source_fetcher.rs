//! Source fetcher port.
//!
//! A source fetcher turns one external system into one labeled prompt
//! section. The context aggregator talks to external systems exclusively
//! through this trait.

use async_trait::async_trait;

use crate::domain::models::{Query, SourceBody, SourceKind};

/// Port for adapters that contribute one section of context.
///
/// Implementations are fail-soft: transport, status and parse failures are
/// folded into [`SourceBody::Failed`] and never escape as errors or panics.
/// Each call is a single attempt; there is no retry.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// The section this fetcher fills.
    fn kind(&self) -> SourceKind;

    /// Query the external system for context relevant to `query`.
    async fn fetch(&self, query: &Query) -> SourceBody;
}
