//! Settlement planning — who gets paid when an arbiter rules.
//!
//! For a claim of `c` with griefing fee `g` and arbiter fee `f`, the claimant
//! deposited `c + 2g`:
//! - **Correct** (claimant vindicated): claimant receives the full deposit plus
//!   `c` from the stake; arbiter receives `f` from the stake. Stake custody
//!   drops by `c + f`.
//! - **Incorrect** (claimant rejected): claimant receives `c` back; the `2g`
//!   griefing portion is split by [`ForfeitPolicy`]; arbiter receives `f`
//!   from the stake.
//!
//! Planning is pure. The ledger releases the planned payouts in one batch and
//! only then writes the ruling.

use serde::de::IntoDeserializer;
use serde::{Deserialize, Serialize};
use stake_custody::{Payout, PayoutReason};
use std::str::FromStr;
use stake_types::{Amount, ClaimId, Identity, StakeId};

use crate::claim::Claim;
use crate::error::LedgerError;
use crate::stake::Stake;

/// Where a rejected claimant's two griefing-fee units go.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForfeitPolicy {
    /// One unit to the ruling arbiter, one unit back into stake custody.
    #[default]
    Split,
    /// Both units to the ruling arbiter.
    ArbiterTakesAll,
    /// Both units back into stake custody.
    StakerTakesAll,
}

impl ForfeitPolicy {
    /// Split the forfeited griefing portion into (to arbiter, to stake).
    fn divide(self, griefing_fee: Amount, forfeited: Amount) -> Result<(Amount, Amount), LedgerError> {
        match self {
            Self::Split => {
                let rest = forfeited
                    .checked_sub(griefing_fee)
                    .ok_or(LedgerError::Overflow)?;
                Ok((griefing_fee, rest))
            }
            Self::ArbiterTakesAll => Ok((forfeited, Amount::ZERO)),
            Self::StakerTakesAll => Ok((Amount::ZERO, forfeited)),
        }
    }
}

/// Parses the same snake_case names the config file uses.
impl FromStr for ForfeitPolicy {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let de: serde::de::value::StrDeserializer<'_, serde::de::value::Error> = s.into_deserializer();
        Self::deserialize(de).map_err(|e| LedgerError::Config(format!("forfeit policy: {e}")))
    }
}

/// The value movement accompanying a ruling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub stake_id: StakeId,
    pub claim_id: ClaimId,
    pub correct: bool,
    /// Releases from custody, zero-amount entries omitted.
    pub payouts: Vec<Payout>,
    pub custody_before: Amount,
    pub custody_after: Amount,
}

impl Settlement {
    /// Total value leaving ledger custody.
    pub fn released(&self) -> Option<Amount> {
        Payout::total(&self.payouts)
    }

    /// Total paid to `who` across all payout reasons.
    pub fn paid_to(&self, who: &Identity) -> Amount {
        self.payouts
            .iter()
            .filter(|p| &p.recipient == who)
            .map(|p| p.amount)
            .sum()
    }
}

/// Compute the settlement for `arbiter` ruling `correct` on `claim`.
///
/// Fails with `InsufficientCustody` when earlier rulings have drawn the stake
/// down below what this ruling must pay out of it.
pub fn plan_settlement(
    stake: &Stake,
    claim: &Claim,
    arbiter: &Identity,
    correct: bool,
    policy: ForfeitPolicy,
) -> Result<Settlement, LedgerError> {
    let before = stake.custody;
    let mut payouts = Vec::with_capacity(4);

    let after = if correct {
        let owed = claim
            .claim_amount
            .checked_add(stake.arbiter_fee)
            .ok_or(LedgerError::Overflow)?;
        let after = before
            .checked_sub(owed)
            .ok_or(LedgerError::InsufficientCustody {
                stake_id: stake.id,
                needed: owed,
                available: before,
            })?;
        payouts.push(Payout::new(
            claim.claimant.clone(),
            claim.deposit,
            PayoutReason::DepositRefund,
        ));
        payouts.push(Payout::new(
            claim.claimant.clone(),
            claim.claim_amount,
            PayoutReason::ClaimAward,
        ));
        after
    } else {
        let forfeited = claim
            .deposit
            .checked_sub(claim.claim_amount)
            .ok_or(LedgerError::Overflow)?;
        let (to_arbiter, to_stake) = policy.divide(stake.griefing_fee, forfeited)?;
        let replenished = before.checked_add(to_stake).ok_or(LedgerError::Overflow)?;
        let after = replenished
            .checked_sub(stake.arbiter_fee)
            .ok_or(LedgerError::InsufficientCustody {
                stake_id: stake.id,
                needed: stake.arbiter_fee,
                available: replenished,
            })?;
        payouts.push(Payout::new(
            claim.claimant.clone(),
            claim.claim_amount,
            PayoutReason::DepositRefund,
        ));
        payouts.push(Payout::new(
            arbiter.clone(),
            to_arbiter,
            PayoutReason::GriefingForfeit,
        ));
        after
    };

    payouts.push(Payout::new(
        arbiter.clone(),
        stake.arbiter_fee,
        PayoutReason::ArbiterFee,
    ));
    payouts.retain(|p| !p.amount.is_zero());

    Ok(Settlement {
        stake_id: stake.id,
        claim_id: claim.id,
        correct,
        payouts,
        custody_before: before,
        custody_after: after,
    })
}
