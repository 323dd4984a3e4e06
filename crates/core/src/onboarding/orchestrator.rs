//! Onboarding orchestrator.
//!
//! Coordinates the gate check, the uniqueness-checked insert, and the
//! best-effort tracking-issue notification for a single onboarding action.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::auth::{AuthError, FormKeyGate};
use crate::customer::{
    validate_motto, validate_name, CustomerError, CustomerRecord, CustomerStore, ValidationError,
};
use crate::status::{STATUS_CREATED, STATUS_DB_UPDATED};

use super::{IssueRequest, TicketTracker};

/// Error type for onboarding operations.
#[derive(Debug, Error)]
pub enum OnboardingError {
    /// Bad or missing shared key; nothing was mutated.
    #[error("Unauthorized")]
    Unauthorized,
    /// A customer with this name already exists. Expected, user-facing.
    #[error("a customer with this name already exists")]
    DuplicateName(String),
    /// A field fails shape validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// Database error.
    #[error("store error: {0}")]
    Store(String),
}

impl From<AuthError> for OnboardingError {
    fn from(_: AuthError) -> Self {
        OnboardingError::Unauthorized
    }
}

/// Coordinates validation, persistence, and external notification for
/// customer onboarding.
pub struct Onboarder {
    gate: FormKeyGate,
    store: Arc<dyn CustomerStore>,
    tracker: Option<Arc<dyn TicketTracker>>,
    callback_url: String,
}

impl Onboarder {
    pub fn new(gate: FormKeyGate, store: Arc<dyn CustomerStore>) -> Self {
        Self {
            gate,
            store,
            tracker: None,
            callback_url: String::new(),
        }
    }

    /// Attach the issue-filing collaborator.
    pub fn with_tracker(
        mut self,
        tracker: Arc<dyn TicketTracker>,
        callback_url: impl Into<String>,
    ) -> Self {
        self.tracker = Some(tracker);
        self.callback_url = callback_url.into();
        self
    }

    /// Deploy path: create a record with initial status "created" and file a
    /// tracking issue (best-effort).
    pub async fn deploy(
        &self,
        name: &str,
        motto: &str,
        key: &str,
    ) -> Result<CustomerRecord, OnboardingError> {
        self.gate.verify(key)?;
        validate_name(name)?;
        validate_motto(motto)?;

        let record = self.insert(name, motto, STATUS_CREATED)?;
        info!(name, "customer record created (deploy)");

        self.notify_tracker(name, motto).await;
        Ok(record)
    }

    /// Direct create path used by automation: initial status "db updated",
    /// no tracking issue.
    pub fn create(
        &self,
        name: &str,
        motto: &str,
        key: &str,
    ) -> Result<CustomerRecord, OnboardingError> {
        self.gate.verify(key)?;
        validate_name(name)?;
        validate_motto(motto)?;

        let record = self.insert(name, motto, STATUS_DB_UPDATED)?;
        info!(name, "customer record created (create)");
        Ok(record)
    }

    /// Form submission path: gate check and best-effort issue filing only;
    /// no record is inserted here.
    pub async fn submit_form(
        &self,
        name: &str,
        motto: &str,
        key: &str,
    ) -> Result<(), OnboardingError> {
        self.gate.verify(key)?;
        validate_name(name)?;
        validate_motto(motto)?;

        self.notify_tracker(name, motto).await;
        Ok(())
    }

    fn insert(
        &self,
        name: &str,
        motto: &str,
        status: &str,
    ) -> Result<CustomerRecord, OnboardingError> {
        match self.store.insert(name, motto, status) {
            Ok(record) => Ok(record),
            Err(CustomerError::DuplicateName(name)) => {
                Err(OnboardingError::DuplicateName(name))
            }
            Err(e) => Err(OnboardingError::Store(e.to_string())),
        }
    }

    /// At-most-once, no-retry notification. Failure is logged and swallowed;
    /// the record insert is never rolled back.
    async fn notify_tracker(&self, name: &str, motto: &str) {
        let Some(ref tracker) = self.tracker else {
            return;
        };

        let request = IssueRequest {
            callback_url: self.callback_url.clone(),
            name: name.to_string(),
            motto: motto.to_string(),
        };

        if let Err(e) = tracker.file_issue(&request).await {
            warn!(name, error = %e, "failed to file tracking issue");
        }
    }
}
