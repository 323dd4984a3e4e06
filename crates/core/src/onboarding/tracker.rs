//! Issue tracker webhook collaborator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::TrackerConfig;

/// Payload POSTed to the tracker webhook to file a tracking issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssueRequest {
    /// URL the tracker's automation calls back into.
    pub callback_url: String,
    pub name: String,
    pub motto: String,
}

/// Error type for tracker calls.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("tracker request failed: {0}")]
    Http(String),
    #[error("tracker returned status {0}")]
    Status(u16),
}

/// Trait for the external issue-filing collaborator.
///
/// Filing is best-effort from the record's point of view: at most once, no
/// retry, failure never rolls back an insert.
#[async_trait]
pub trait TicketTracker: Send + Sync {
    async fn file_issue(&self, request: &IssueRequest) -> Result<(), TrackerError>;
}

/// HTTP webhook implementation of `TicketTracker`.
pub struct HttpTracker {
    client: Client,
    config: TrackerConfig,
}

impl HttpTracker {
    pub fn new(config: TrackerConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }
}

#[async_trait]
impl TicketTracker for HttpTracker {
    async fn file_issue(&self, request: &IssueRequest) -> Result<(), TrackerError> {
        let mut builder = self.client.post(&self.config.url).json(request);

        if let Some(ref token) = self.config.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TrackerError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TrackerError::Status(response.status().as_u16()));
        }

        debug!(name = %request.name, "tracking issue filed");
        Ok(())
    }
}
