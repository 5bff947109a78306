//! Positional record identifiers.
//!
//! Stakes are numbered by their position in the ledger's stake sequence and claims
//! by their position in the owning stake's claim sequence. Ids are never reused.

/// Position of a stake in the ledger.
pub type StakeId = u64;

/// Position of a claim within its stake.
pub type ClaimId = u64;
