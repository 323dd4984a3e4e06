use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cluster::{ClusterClient, ClusterError, DeploymentInfo};

/// Mock cluster client with a settable inventory.
#[derive(Default)]
pub struct MockCluster {
    deployments: Arc<RwLock<Vec<DeploymentInfo>>>,
    fail_next: Arc<RwLock<Option<ClusterError>>>,
}

impl MockCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_deployments(&self, deployments: Vec<DeploymentInfo>) {
        *self.deployments.write().await = deployments;
    }

    /// Make the next `list_deployments` call fail with the given error.
    pub async fn fail_next(&self, error: ClusterError) {
        *self.fail_next.write().await = Some(error);
    }
}

#[async_trait]
impl ClusterClient for MockCluster {
    async fn list_deployments(&self) -> Result<Vec<DeploymentInfo>, ClusterError> {
        if let Some(error) = self.fail_next.write().await.take() {
            return Err(error);
        }

        Ok(self.deployments.read().await.clone())
    }
}
