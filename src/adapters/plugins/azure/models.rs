//! Azure Resource Manager response models.
//!
//! Only the fields the fetchers read are modeled; everything else in the
//! ARM payloads is ignored.

use serde::{Deserialize, Serialize};

/// Response of the list-virtual-machines call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualMachineList {
    /// Virtual machines in the resource group.
    #[serde(default)]
    pub value: Vec<VirtualMachine>,
}

/// A virtual machine resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualMachine {
    /// Resource name.
    pub name: String,
}

/// Response of the instance-view call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceView {
    /// Provisioning and power-state statuses.
    #[serde(default)]
    pub statuses: Vec<InstanceViewStatus>,
}

/// One status entry of an instance view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceViewStatus {
    /// Status code, e.g. `PowerState/running`.
    #[serde(default)]
    pub code: String,
    /// Human-readable status, e.g. `VM running`.
    #[serde(rename = "displayStatus", default)]
    pub display_status: Option<String>,
}

impl InstanceView {
    /// The power state's display text.
    ///
    /// Prefers the `PowerState/*` entry, then the second entry (ARM lists
    /// provisioning state first), then `unknown`.
    pub fn power_state(&self) -> String {
        self.statuses
            .iter()
            .find(|s| s.code.starts_with("PowerState/"))
            .or_else(|| self.statuses.get(1))
            .and_then(|s| s.display_status.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Response of the Azure Monitor metrics call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsResponse {
    /// One entry per requested metric.
    #[serde(default)]
    pub value: Vec<Metric>,
}

/// A single metric and its time series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    /// Metric name.
    pub name: MetricName,
    /// Unit, e.g. `Percent`.
    #[serde(default)]
    pub unit: Option<String>,
    /// Time series (one per dimension combination).
    #[serde(default)]
    pub timeseries: Vec<TimeSeries>,
}

/// Metric name in raw and localized form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricName {
    /// Raw metric name, e.g. `Percentage CPU`.
    pub value: String,
    /// Localized display name.
    #[serde(rename = "localizedValue", default)]
    pub localized_value: Option<String>,
}

/// One time series of a metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Samples in time order.
    #[serde(default)]
    pub data: Vec<MetricSample>,
}

/// One aggregated sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSample {
    /// ISO-8601 sample start time.
    #[serde(rename = "timeStamp")]
    pub time_stamp: String,
    /// Average over the interval, absent when no data was collected.
    #[serde(default)]
    pub average: Option<f64>,
}
