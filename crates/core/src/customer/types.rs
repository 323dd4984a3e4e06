//! Customer record types and field validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of a customer name.
pub const NAME_MAX_LEN: usize = 255;
/// Minimum length of a motto.
pub const MOTTO_MIN_LEN: usize = 3;
/// Maximum length of a motto.
pub const MOTTO_MAX_LEN: usize = 1024;
/// Minimum length of a status string.
pub const STATUS_MIN_LEN: usize = 3;
/// Maximum length of a status string.
pub const STATUS_MAX_LEN: usize = 255;

/// A stored customer record.
///
/// `name` is the unique identity; `id` is store-assigned and immutable.
/// Records are never deleted by this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerRecord {
    /// Store-assigned numeric id.
    pub id: i64,
    /// Unique customer name (1-255 chars).
    pub name: String,
    /// Customer motto (3-1024 chars).
    pub motto: String,
    /// Free-form provisioning status (3-255 chars once set).
    pub status: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the status was last overwritten.
    pub updated_at: DateTime<Utc>,
}

/// Field shape violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must be 1-{NAME_MAX_LEN} characters")]
    Name,
    #[error("motto must be {MOTTO_MIN_LEN}-{MOTTO_MAX_LEN} characters")]
    Motto,
    #[error("status must be {STATUS_MIN_LEN}-{STATUS_MAX_LEN} characters")]
    Status,
}

/// Validate a customer name (1-255 chars).
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if (1..=NAME_MAX_LEN).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::Name)
    }
}

/// Validate a motto (3-1024 chars).
pub fn validate_motto(motto: &str) -> Result<(), ValidationError> {
    let len = motto.chars().count();
    if (MOTTO_MIN_LEN..=MOTTO_MAX_LEN).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::Motto)
    }
}

/// Validate a status string (3-255 chars). The vocabulary itself is open.
pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    let len = status.chars().count();
    if (STATUS_MIN_LEN..=STATUS_MAX_LEN).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::Status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_bounds() {
        assert!(validate_name("a").is_ok());
        assert!(validate_name(&"x".repeat(255)).is_ok());
        assert_eq!(validate_name(""), Err(ValidationError::Name));
        assert_eq!(validate_name(&"x".repeat(256)), Err(ValidationError::Name));
    }

    #[test]
    fn test_validate_motto_bounds() {
        assert!(validate_motto("abc").is_ok());
        assert!(validate_motto(&"x".repeat(1024)).is_ok());
        assert_eq!(validate_motto("ab"), Err(ValidationError::Motto));
        assert_eq!(
            validate_motto(&"x".repeat(1025)),
            Err(ValidationError::Motto)
        );
    }

    #[test]
    fn test_validate_status_bounds() {
        assert!(validate_status("live").is_ok());
        assert!(validate_status("initializing").is_ok());
        assert_eq!(validate_status("ok"), Err(ValidationError::Status));
        assert_eq!(
            validate_status(&"x".repeat(256)),
            Err(ValidationError::Status)
        );
    }

    #[test]
    fn test_validation_counts_chars_not_bytes() {
        // 255 multibyte chars is a valid name even though it exceeds 255 bytes
        assert!(validate_name(&"å".repeat(255)).is_ok());
    }

    #[test]
    fn test_record_serialization() {
        let record = CustomerRecord {
            id: 1,
            name: "acme".to_string(),
            motto: "we try harder".to_string(),
            status: "created".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: CustomerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, record);
    }
}
