//! The fee schedule fixed on a stake at creation.

use serde::{Deserialize, Serialize};
use stake_types::Amount;

use crate::error::FeeError;
use crate::validation::{max_claim_amount, required_claim_deposit};

/// Stake amount and the two fees carved out of it.
///
/// Fees never change after the stake is created, so the schedule is `Copy`
/// and travels with the stake record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub stake_amount: Amount,
    pub arbiter_fee: Amount,
    pub griefing_fee: Amount,
}

impl FeeSchedule {
    pub fn new(stake_amount: Amount, arbiter_fee: Amount, griefing_fee: Amount) -> Self {
        Self {
            stake_amount,
            arbiter_fee,
            griefing_fee,
        }
    }

    /// Largest claim the stake can accept.
    pub fn max_claim(&self) -> Result<Amount, FeeError> {
        max_claim_amount(self.stake_amount, self.arbiter_fee, self.griefing_fee)
    }

    /// Deposit a claimant must attach for `claim_amount`.
    pub fn claim_deposit(&self, claim_amount: Amount) -> Result<Amount, FeeError> {
        required_claim_deposit(claim_amount, self.griefing_fee)
    }
}
