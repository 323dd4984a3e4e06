//! Shared form-key gate.

use super::AuthError;
use crate::config::AuthConfig;

/// Required length of the shared form key.
pub const FORM_KEY_LEN: usize = 28;

/// Gate that validates the shared form key carried in request bodies.
///
/// Succeeds only when a key is configured AND the provided value is exactly
/// equal. Callers cannot distinguish "no key configured" from "wrong key";
/// both are `Unauthorized`.
pub struct FormKeyGate {
    expected: Option<String>,
}

impl FormKeyGate {
    pub fn new(expected: Option<String>) -> Self {
        Self { expected }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.form_key.clone())
    }

    /// Validate a key against the configured secret.
    ///
    /// Pure check with no side effects; callers must reject the request
    /// before any mutation occurs.
    pub fn verify(&self, key: &str) -> Result<(), AuthError> {
        let expected = self.expected.as_ref().ok_or(AuthError::Unauthorized)?;

        if constant_time_eq(key.as_bytes(), expected.as_bytes()) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
