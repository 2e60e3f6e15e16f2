//! Azure Resource Manager HTTP client.
//!
//! Wraps the compute and monitor endpoints used by the instance-status and
//! instance-metrics fetchers. All methods are single attempts and return
//! [`UpstreamError`] on transport, status or shape failures.

use tracing::instrument;

use crate::domain::errors::UpstreamError;
use crate::domain::models::AzureConfig;
use crate::infrastructure::http::{Auth, HttpClient};

use super::metrics::MetricsWindow;
use super::models::{InstanceView, MetricsResponse, VirtualMachine, VirtualMachineList};

/// HTTP client for Azure Resource Manager.
#[derive(Debug, Clone)]
pub struct AzureClient {
    /// Shared HTTP adapter.
    http: HttpClient,
    /// Bearer token auth.
    auth: Auth,
    /// Management endpoint, without trailing slash.
    base_url: String,
    subscription_id: String,
    resource_group: String,
    compute_api_version: String,
    metrics_api_version: String,
}

impl AzureClient {
    /// Create a client from configuration.
    ///
    /// Returns `NotConfigured` if no access token is set.
    pub fn new(http: HttpClient, config: &AzureConfig) -> Result<Self, UpstreamError> {
        let token = config
            .access_token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| UpstreamError::not_configured("azure.access_token is not set"))?;

        Ok(Self {
            http,
            auth: Auth::Bearer(token),
            base_url: config.management_url.trim_end_matches('/').to_string(),
            subscription_id: config.subscription_id.clone(),
            resource_group: config.resource_group.clone(),
            compute_api_version: config.compute_api_version.clone(),
            metrics_api_version: config.metrics.api_version.clone(),
        })
    }

    /// Collection URL of the resource group's virtual machines.
    fn vm_collection_url(&self) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Compute/virtualMachines",
            self.base_url, self.subscription_id, self.resource_group
        )
    }

    /// List the virtual machines in the configured resource group.
    #[instrument(skip(self))]
    pub async fn list_virtual_machines(&self) -> Result<Vec<VirtualMachine>, UpstreamError> {
        let params = [("api-version", self.compute_api_version.clone())];
        let list: VirtualMachineList = self
            .http
            .get(&self.vm_collection_url(), &self.auth, &params)
            .await?
            .into_success_json()?;
        Ok(list.value)
    }

    /// Fetch the instance view (power state) of one virtual machine.
    #[instrument(skip(self))]
    pub async fn instance_view(&self, vm_name: &str) -> Result<InstanceView, UpstreamError> {
        let url = format!("{}/{}/instanceView", self.vm_collection_url(), vm_name);
        let params = [("api-version", self.compute_api_version.clone())];
        self.http
            .get(&url, &self.auth, &params)
            .await?
            .into_success_json()
    }

    /// Fetch averaged metrics for one virtual machine over `window`.
    #[instrument(skip(self, window))]
    pub async fn metrics(
        &self,
        vm_name: &str,
        metric_names: &[String],
        window: &MetricsWindow,
    ) -> Result<MetricsResponse, UpstreamError> {
        let url = format!(
            "{}/{}/providers/microsoft.insights/metrics",
            self.vm_collection_url(),
            vm_name
        );
        let params = [
            ("api-version", self.metrics_api_version.clone()),
            ("metricnames", metric_names.join(",")),
            ("timespan", window.timespan()),
            ("interval", MetricsWindow::INTERVAL.to_string()),
            ("aggregation", "Average".to_string()),
        ];
        self.http
            .get(&url, &self.auth, &params)
            .await?
            .into_success_json()
    }
}
