//! Fundamental types for the stake ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! caller identities, value amounts, timestamps and positional record identifiers.

pub mod amount;
pub mod error;
pub mod identity;
pub mod ids;
pub mod time;

pub use amount::Amount;
pub use error::StakeError;
pub use identity::Identity;
pub use ids::{ClaimId, StakeId};
pub use time::Timestamp;
