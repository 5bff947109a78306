//! Caller identities.

use crate::error::StakeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An authenticated participant: staker, funder, arbiter or claimant.
///
/// The ledger never authenticates an identity itself; it receives one per call
/// from the enclosing runtime and compares identities by value.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse an identity, rejecting blank input.
    pub fn parse(raw: &str) -> Result<Self, StakeError> {
        let id = Self::new(raw);
        if id.is_valid() {
            Ok(id)
        } else {
            Err(StakeError::InvalidIdentity(raw.to_string()))
        }
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An identity is usable only when it is non-empty.
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
