//! Value released from ledger custody to a participant.

use serde::{Deserialize, Serialize};
use stake_types::{Amount, Identity};

/// Why a payout is made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutReason {
    /// Claim deposit handed back to the claimant (in full or the claim portion).
    DepositRefund,
    /// Claim amount paid out of the stake to a vindicated claimant.
    ClaimAward,
    /// Arbiter fee paid out of the stake to the ruling arbiter.
    ArbiterFee,
    /// Griefing fee forfeited by a rejected claimant.
    GriefingForfeit,
}

/// A single release from custody.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub recipient: Identity,
    pub amount: Amount,
    pub reason: PayoutReason,
}

impl Payout {
    pub fn new(recipient: Identity, amount: Amount, reason: PayoutReason) -> Self {
        Self {
            recipient,
            amount,
            reason,
        }
    }

    /// Sum of a batch of payouts, `None` on overflow.
    pub fn total(payouts: &[Payout]) -> Option<Amount> {
        payouts
            .iter()
            .try_fold(Amount::ZERO, |acc, p| acc.checked_add(p.amount))
    }
}
