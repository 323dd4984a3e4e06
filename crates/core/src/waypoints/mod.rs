//! Waypoints demo feed.
//!
//! Loads an on-disk JSON array of waypoint objects and truncates it to the
//! configured limit. The objects are passed through opaquely; the server
//! streams them out one per tick.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Error type for waypoint loading.
#[derive(Debug, Error)]
pub enum WaypointError {
    #[error("failed to read waypoints file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse waypoints file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("waypoints file does not contain a JSON array")]
    NotAnArray,
}

/// Load at most `limit` waypoints from the JSON array at `path`.
pub fn load_waypoints(path: impl AsRef<Path>, limit: usize) -> Result<Vec<Value>, WaypointError> {
    let raw = std::fs::read_to_string(path)?;
    let parsed: Value = serde_json::from_str(&raw)?;

    let Value::Array(mut waypoints) = parsed else {
        return Err(WaypointError::NotAnArray);
    };

    waypoints.truncate(limit);
    debug!(count = waypoints.len(), "loaded waypoints");
    Ok(waypoints)
}
