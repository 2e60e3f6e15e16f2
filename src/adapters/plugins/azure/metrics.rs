//! Compute-instance metrics fetcher.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::domain::errors::UpstreamError;
use crate::domain::models::{Query, SourceBody, SourceKind, NO_METRIC_SAMPLES};
use crate::domain::ports::SourceFetcher;

use super::client::AzureClient;
use super::models::{Metric, MetricsResponse};

/// A trailing time window for a metrics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsWindow {
    /// Window start (inclusive).
    pub start: DateTime<Utc>,
    /// Window end.
    pub end: DateTime<Utc>,
}

impl MetricsWindow {
    /// Sampling interval (ISO-8601 duration).
    pub const INTERVAL: &'static str = "PT5M";

    /// The `minutes`-long window ending at `end`.
    pub fn trailing(end: DateTime<Utc>, minutes: u32) -> Self {
        Self {
            start: end - Duration::minutes(i64::from(minutes)),
            end,
        }
    }

    /// Azure `timespan` parameter: `start/end` in RFC 3339, second precision.
    pub fn timespan(&self) -> String {
        format!(
            "{}/{}",
            self.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.end.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}

/// Samples averaged performance counters of the configured machine over a
/// trailing window at a fixed 5-minute interval.
pub struct InstanceMetricsFetcher {
    client: Arc<AzureClient>,
    vm_name: String,
    metric_names: Vec<String>,
    window_minutes: u32,
}

impl InstanceMetricsFetcher {
    /// Create a fetcher for `vm_name`.
    pub fn new(
        client: Arc<AzureClient>,
        vm_name: impl Into<String>,
        metric_names: Vec<String>,
        window_minutes: u32,
    ) -> Self {
        Self {
            client,
            vm_name: vm_name.into(),
            metric_names: metric_names
                .into_iter()
                .filter(|name| !name.trim().is_empty())
                .collect(),
            window_minutes,
        }
    }

    async fn collect(&self) -> Result<SourceBody, UpstreamError> {
        let window = MetricsWindow::trailing(Utc::now(), self.window_minutes);
        let response = self
            .client
            .metrics(&self.vm_name, &self.metric_names, &window)
            .await?;

        let lines = format_samples(&response);
        if lines.is_empty() {
            return Ok(SourceBody::not_found(NO_METRIC_SAMPLES));
        }
        Ok(SourceBody::Data(lines.join("\n")))
    }
}

#[async_trait]
impl SourceFetcher for InstanceMetricsFetcher {
    fn kind(&self) -> SourceKind {
        SourceKind::InstanceMetrics
    }

    async fn fetch(&self, _query: &Query) -> SourceBody {
        self.collect().await.into()
    }
}

/// One line per sample that carries an average:
/// `{timestamp} — {metric}: {value}%`.
pub fn format_samples(response: &MetricsResponse) -> Vec<String> {
    response
        .value
        .iter()
        .flat_map(|metric| {
            metric
                .timeseries
                .iter()
                .flat_map(|series| series.data.iter())
                .filter_map(move |sample| {
                    sample.average.map(|avg| {
                        format!(
                            "{} — {}: {}",
                            sample.time_stamp,
                            metric.name.value,
                            format_value(avg, metric)
                        )
                    })
                })
        })
        .collect()
}

fn format_value(value: f64, metric: &Metric) -> String {
    match metric.unit.as_deref() {
        None | Some("Percent") => format!("{value:.2}%"),
        Some(unit) => format!("{value:.2} {unit}"),
    }
}
