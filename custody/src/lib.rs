//! Abstract value-transfer traits for the stake ledger.
//!
//! The ledger decides *when* and *how much* value moves; a custody backend
//! (an on-chain account, a payment rail, an in-memory book for testing)
//! implements [`ValueTransfer`] and performs the movement. The rest of the
//! workspace depends only on the trait.

pub mod error;
pub mod payout;
pub mod transfer;

pub use error::CustodyError;
pub use payout::{Payout, PayoutReason};
pub use transfer::ValueTransfer;
