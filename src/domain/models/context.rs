//! Aggregated source context for one request cycle.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::domain::errors::UpstreamError;

/// Sentinel returned when the compute provider lists no instances.
pub const NO_INSTANCES_FOUND: &str = "no virtual machines found";

/// Sentinel returned when the metrics window holds no samples.
pub const NO_METRIC_SAMPLES: &str = "no metric samples in window";

/// Sentinel returned when the ticket search matches nothing.
pub const NO_INCIDENTS_FOUND: &str = "no incidents found";

/// Sentinel returned when the CI project has no pipelines.
pub const NO_PIPELINES_FOUND: &str = "no pipelines found";

/// Sentinel returned when the query carries no pipeline identifier.
pub const NO_PIPELINE_ID: &str = "no valid pipeline ID found in query";

/// The external concerns that contribute a section to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Power state of each compute instance.
    InstanceStatus,
    /// Averaged performance counters for the monitored instance.
    InstanceMetrics,
    /// Incident tickets matching the query.
    Tickets,
    /// CI pipeline status.
    Pipelines,
}

impl SourceKind {
    /// Every source, in prompt order.
    pub const ALL: [Self; 4] = [
        Self::InstanceStatus,
        Self::InstanceMetrics,
        Self::Tickets,
        Self::Pipelines,
    ];

    /// Section header used in the prompt.
    pub const fn label(self) -> &'static str {
        match self {
            Self::InstanceStatus => "Azure Resources",
            Self::InstanceMetrics => "Azure Metrics",
            Self::Tickets => "ServiceNow Tickets",
            Self::Pipelines => "GitLab Pipelines",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a single source fetch.
///
/// `NotFound` is an explicit "no data" answer and is kept apart from
/// `Failed` so the prompt can tell the model "nothing matched" instead of
/// "the lookup broke".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SourceBody {
    /// Formatted, human-readable data lines.
    Data(String),
    /// A fixed sentinel meaning the source answered with nothing relevant.
    NotFound(String),
    /// The source could not be queried.
    Failed(UpstreamError),
}

impl SourceBody {
    /// Wrap a sentinel string.
    pub fn not_found(sentinel: &str) -> Self {
        Self::NotFound(sentinel.to_string())
    }

    /// Whether the fetch failed.
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Short status word for tables and logs.
    pub const fn status(&self) -> &'static str {
        match self {
            Self::Data(_) => "ok",
            Self::NotFound(_) => "empty",
            Self::Failed(_) => "error",
        }
    }

    /// Error class of a failed fetch, e.g. `timeout` or `status`.
    pub const fn error_kind(&self) -> Option<&'static str> {
        match self {
            Self::Failed(err) => Some(err.kind()),
            _ => None,
        }
    }
}

impl From<Result<Self, UpstreamError>> for SourceBody {
    fn from(result: Result<Self, UpstreamError>) -> Self {
        result.unwrap_or_else(Self::Failed)
    }
}

/// A labeled section produced by one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceResult {
    /// Which source produced this section.
    pub kind: SourceKind,
    /// Section header.
    pub label: &'static str,
    /// Section content.
    pub body: SourceBody,
}

impl SourceResult {
    /// Create a section for `kind`.
    pub const fn new(kind: SourceKind, body: SourceBody) -> Self {
        Self {
            kind,
            label: kind.label(),
            body,
        }
    }

    /// Render the section body as prompt text.
    ///
    /// Data and sentinels pass through verbatim; failures become a
    /// descriptive line naming the source and the error.
    pub fn render(&self) -> String {
        match &self.body {
            SourceBody::Data(text) | SourceBody::NotFound(text) => text.clone(),
            SourceBody::Failed(err) => format!("Error fetching {}: {err}", self.label),
        }
    }
}

/// All source sections for one query, one per [`SourceKind`], in
/// [`SourceKind::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AggregatedContext {
    sections: Vec<SourceResult>,
}

impl AggregatedContext {
    /// Build a context from a lookup of per-kind bodies.
    ///
    /// Kinds missing from `bodies` are filled with a `NotConfigured`
    /// failure, so the result always holds every section in order.
    pub fn from_bodies<I>(bodies: I) -> Self
    where
        I: IntoIterator<Item = (SourceKind, SourceBody)>,
    {
        let mut slots: [Option<SourceBody>; 4] = [None, None, None, None];
        for (kind, body) in bodies {
            let index = SourceKind::ALL
                .iter()
                .position(|k| *k == kind)
                .unwrap_or_default();
            if slots[index].replace(body).is_some() {
                warn!(source = %kind, "duplicate source body, keeping the later one");
            }
        }

        let sections = SourceKind::ALL
            .iter()
            .zip(slots)
            .map(|(kind, body)| {
                let body = body.unwrap_or_else(|| {
                    SourceBody::Failed(UpstreamError::not_configured(format!(
                        "no fetcher registered for {kind}"
                    )))
                });
                SourceResult::new(*kind, body)
            })
            .collect();

        Self { sections }
    }

    /// Sections in prompt order.
    pub fn sections(&self) -> &[SourceResult] {
        &self.sections
    }

    /// The section for a given source.
    pub fn get(&self, kind: SourceKind) -> Option<&SourceResult> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Number of sections whose fetch failed.
    pub fn failure_count(&self) -> usize {
        self.sections.iter().filter(|s| s.body.is_failed()).count()
    }
}
