//! Compute-instance status fetcher.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::errors::UpstreamError;
use crate::domain::models::{Query, SourceBody, SourceKind, NO_INSTANCES_FOUND};
use crate::domain::ports::SourceFetcher;

use super::client::AzureClient;

/// Reports the power state of every virtual machine in the resource group.
///
/// Issues one list call plus one instance-view call per machine (N+1
/// requests, in sequence). This is fine for the handful of machines in a
/// typical resource group but grows linearly with the group size.
pub struct InstanceStatusFetcher {
    client: Arc<AzureClient>,
}

impl InstanceStatusFetcher {
    /// Create a fetcher backed by `client`.
    pub const fn new(client: Arc<AzureClient>) -> Self {
        Self { client }
    }

    async fn collect(&self) -> Result<SourceBody, UpstreamError> {
        let machines = self.client.list_virtual_machines().await?;
        if machines.is_empty() {
            return Ok(SourceBody::not_found(NO_INSTANCES_FOUND));
        }

        let mut lines = Vec::with_capacity(machines.len());
        for vm in &machines {
            match self.client.instance_view(&vm.name).await {
                Ok(view) => lines.push(format!("{}: {}", vm.name, view.power_state())),
                Err(err) => {
                    warn!(vm = %vm.name, error = %err, "instance view lookup failed");
                    lines.push(format!("{}: status unavailable ({err})", vm.name));
                }
            }
        }

        debug!(instances = lines.len(), "collected instance statuses");
        Ok(SourceBody::Data(lines.join("\n")))
    }
}

#[async_trait]
impl SourceFetcher for InstanceStatusFetcher {
    fn kind(&self) -> SourceKind {
        SourceKind::InstanceStatus
    }

    async fn fetch(&self, _query: &Query) -> SourceBody {
        self.collect().await.into()
    }
}
