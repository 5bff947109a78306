//! Fee and deposit validation for stakes and claims.
//!
//! Every function here is pure: no I/O, no state, deterministic given inputs.
//! The ledger runs these checks before it mutates anything.
//!
//! - **Stake terms**: `stake > 0`, `arbiter_fee + griefing_fee < stake`, at least one arbiter,
//!   deadline in the future
//! - **Claim deposit**: `claim + 2 × griefing_fee`
//! - **Claim ceiling**: `stake − arbiter_fee − griefing_fee`

pub mod error;
pub mod schedule;
pub mod validation;

pub use error::FeeError;
pub use schedule::FeeSchedule;
pub use validation::{
    check_attached, max_claim_amount, required_claim_deposit, validate_claim_amount,
    validate_stake_terms,
};
