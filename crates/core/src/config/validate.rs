use crate::auth::FORM_KEY_LEN;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Form key, when set, is exactly 28 characters
/// - Stream bounds are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if let Some(ref key) = config.auth.form_key {
        if key.chars().count() != FORM_KEY_LEN {
            return Err(ConfigError::ValidationError(format!(
                "auth.form_key must be exactly {} characters",
                FORM_KEY_LEN
            )));
        }
    }

    if config.stream.max_snapshots == 0 {
        return Err(ConfigError::ValidationError(
            "stream.max_snapshots cannot be 0".to_string(),
        ));
    }

    if config.stream.interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "stream.interval_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
