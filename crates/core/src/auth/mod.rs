mod gate;

pub use gate::*;

use thiserror::Error;

/// Error type for the authorization gate.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Bad or missing shared key, or no key configured at all.
    #[error("Unauthorized")]
    Unauthorized,
}
