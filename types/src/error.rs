//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for identity and amount parsing at the workspace edges.
#[derive(Debug, Error)]
pub enum StakeError {
    #[error("invalid identity: {0:?}")]
    InvalidIdentity(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}
