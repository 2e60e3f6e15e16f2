//! Azure compute adapter.
//!
//! Provides two source fetchers backed by Azure Resource Manager: the
//! power state of every virtual machine in a resource group, and averaged
//! Azure Monitor metrics for one machine.

pub mod client;
pub mod instance_status;
pub mod metrics;
pub mod models;

pub use client::AzureClient;
pub use instance_status::InstanceStatusFetcher;
pub use metrics::{InstanceMetricsFetcher, MetricsWindow};
