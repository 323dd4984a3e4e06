use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::onboarding::{IssueRequest, TicketTracker, TrackerError};

/// Mock tracker that records filed issues and can fail on demand.
#[derive(Default)]
pub struct MockTracker {
    filed: Arc<RwLock<Vec<IssueRequest>>>,
    fail_next: Arc<RwLock<Option<TrackerError>>>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// All issue requests filed so far, in order.
    pub async fn filed_issues(&self) -> Vec<IssueRequest> {
        self.filed.read().await.clone()
    }

    /// Make the next `file_issue` call fail with the given error.
    pub async fn fail_next(&self, error: TrackerError) {
        *self.fail_next.write().await = Some(error);
    }
}

#[async_trait]
impl TicketTracker for MockTracker {
    async fn file_issue(&self, request: &IssueRequest) -> Result<(), TrackerError> {
        if let Some(error) = self.fail_next.write().await.take() {
            return Err(error);
        }

        self.filed.write().await.push(request.clone());
        Ok(())
    }
}
