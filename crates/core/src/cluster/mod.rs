//! Cluster inventory client.
//!
//! Thin read-only proxy over the deployment controller's listing endpoint.
//! Inventory is not joined against the record store; the two views can
//! disagree and callers are expected to tolerate that.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::ClusterConfig;

/// One running deployment as reported by the cluster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeploymentInfo {
    pub name: String,
    pub replicas: u32,
}

/// Error type for cluster queries.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("cluster request failed: {0}")]
    Http(String),
    #[error("cluster returned status {0}")]
    Status(u16),
    #[error("failed to decode cluster response: {0}")]
    Decode(String),
}

/// Trait for querying the deployment controller.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    async fn list_deployments(&self) -> Result<Vec<DeploymentInfo>, ClusterError>;
}

/// HTTP implementation of `ClusterClient`.
pub struct HttpClusterClient {
    client: Client,
    config: ClusterConfig,
}

impl HttpClusterClient {
    pub fn new(config: ClusterConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }
}

#[async_trait]
impl ClusterClient for HttpClusterClient {
    async fn list_deployments(&self) -> Result<Vec<DeploymentInfo>, ClusterError> {
        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| ClusterError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClusterError::Status(response.status().as_u16()));
        }

        let deployments: Vec<DeploymentInfo> = response
            .json()
            .await
            .map_err(|e| ClusterError::Decode(e.to_string()))?;

        debug!(count = deployments.len(), "listed cluster deployments");
        Ok(deployments)
    }
}
