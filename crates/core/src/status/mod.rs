//! Status state machine.
//!
//! The status vocabulary is intentionally open: any 3-255 character string
//! is a valid status and any status may follow any other. The machine
//! enforces existence and shape only; there are no forbidden transitions.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::customer::{validate_status, CustomerError, CustomerRecord, CustomerStore,
    ValidationError};

/// Sentinel status emitted by the stream when no record exists yet.
pub const STATUS_INITIALIZING: &str = "initializing";
/// Initial status assigned on the deploy path.
pub const STATUS_CREATED: &str = "created";
/// Initial status assigned on the direct create path.
pub const STATUS_DB_UPDATED: &str = "db updated";

/// Error type for status transitions.
#[derive(Debug, Error)]
pub enum StatusError {
    /// The new status fails shape validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// No record exists for this name.
    #[error("Could not find that customer")]
    NotFound(String),
    /// Database error.
    #[error("store error: {0}")]
    Store(String),
}

/// Applies status transitions against the record store.
pub struct StatusMachine {
    store: Arc<dyn CustomerStore>,
}

impl StatusMachine {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    /// Validate and apply a status transition.
    ///
    /// Overwrites unconditionally: last write wins, no history is kept.
    pub fn apply(&self, name: &str, new_status: &str) -> Result<CustomerRecord, StatusError> {
        validate_status(new_status)?;

        let record = match self.store.update_status(name, new_status) {
            Ok(record) => record,
            Err(CustomerError::NotFound(name)) => return Err(StatusError::NotFound(name)),
            Err(e) => return Err(StatusError::Store(e.to_string())),
        };

        debug!(name, status = new_status, "status applied");
        Ok(record)
    }
}
