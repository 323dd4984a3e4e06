//! Customer storage trait and error type.

use thiserror::Error;

use super::CustomerRecord;

/// Error type for customer store operations.
///
/// Duplicate names and missing records are expected, recoverable conditions
/// and are surfaced as distinct kinds, never conflated.
#[derive(Debug, Error)]
pub enum CustomerError {
    /// A record with this name already exists.
    #[error("a customer with the name '{0}' already exists")]
    DuplicateName(String),
    /// No record exists for this name.
    #[error("customer not found: {0}")]
    NotFound(String),
    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

/// Trait for customer record storage backends.
///
/// The store is the single source of truth for customer records and the only
/// shared mutable resource in the system. Implementations must serialize
/// concurrent inserts on the same name (uniqueness) and concurrent status
/// updates (last-write-wins).
pub trait CustomerStore: Send + Sync {
    /// Insert a new record. Fails with `DuplicateName` if the name is taken;
    /// the existing record is left untouched.
    fn insert(&self, name: &str, motto: &str, status: &str)
        -> Result<CustomerRecord, CustomerError>;

    /// Look up a record by name. Reflects the latest committed state.
    fn find_by_name(&self, name: &str) -> Result<Option<CustomerRecord>, CustomerError>;

    /// Overwrite the status of an existing record and return the updated
    /// record. Fails with `NotFound` if no record exists for `name`.
    fn update_status(&self, name: &str, new_status: &str)
        -> Result<CustomerRecord, CustomerError>;

    /// List all records, ordered by id.
    fn list(&self) -> Result<Vec<CustomerRecord>, CustomerError>;
}
