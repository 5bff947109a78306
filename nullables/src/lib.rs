//! Nullable infrastructure for deterministic testing.
//!
//! The ledger's external collaborators (time source, value transfer) are
//! abstracted behind plain values and traits. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests and in the replay CLI.

pub mod clock;
pub mod custody;

pub use clock::NullClock;
pub use custody::{Movement, NullCustody};
