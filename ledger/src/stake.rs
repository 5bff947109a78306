//! Stake records: value locked behind named arbiters.

use serde::{Deserialize, Serialize};
use stake_fees::FeeSchedule;
use stake_types::{Amount, ClaimId, Identity, StakeId, Timestamp};

use crate::claim::Claim;

/// Terms supplied by the caller of `create_stake`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStake {
    /// On whose behalf the stake exists; need not be the funder.
    pub staker: Identity,
    /// Arbiters in declared order; rulings address them by position.
    pub arbiters: Vec<Identity>,
    pub stake_amount: Amount,
    pub arbiter_fee: Amount,
    pub griefing_fee: Amount,
    /// Claims are accepted up to and including this instant.
    pub deadline: Timestamp,
    #[serde(default)]
    pub metadata: Vec<u8>,
}

/// A locked commitment held in ledger custody.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stake {
    pub id: StakeId,
    pub staker: Identity,
    /// The caller whose attached value funded the stake.
    pub funder: Identity,
    pub arbiters: Vec<Identity>,
    pub stake_amount: Amount,
    pub arbiter_fee: Amount,
    pub griefing_fee: Amount,
    pub deadline: Timestamp,
    pub metadata: Vec<u8>,
    pub created_at: Timestamp,
    /// Value still held for this stake. Starts at `stake_amount`; only
    /// settlement moves it.
    pub custody: Amount,
    pub claims: Vec<Claim>,
}

impl Stake {
    pub(crate) fn from_terms(id: StakeId, funder: Identity, terms: NewStake, now: Timestamp) -> Self {
        Self {
            id,
            staker: terms.staker,
            funder,
            arbiters: terms.arbiters,
            stake_amount: terms.stake_amount,
            arbiter_fee: terms.arbiter_fee,
            griefing_fee: terms.griefing_fee,
            deadline: terms.deadline,
            metadata: terms.metadata,
            created_at: now,
            custody: terms.stake_amount,
            claims: Vec::new(),
        }
    }

    pub fn fees(&self) -> FeeSchedule {
        FeeSchedule::new(self.stake_amount, self.arbiter_fee, self.griefing_fee)
    }

    /// The arbiter declared at `index`, if any.
    pub fn arbiter(&self, index: usize) -> Option<&Identity> {
        self.arbiters.get(index)
    }

    pub fn claim(&self, id: ClaimId) -> Option<&Claim> {
        usize::try_from(id).ok().and_then(|i| self.claims.get(i))
    }

    pub(crate) fn claim_mut(&mut self, id: ClaimId) -> Option<&mut Claim> {
        let index = usize::try_from(id).unwrap_or(usize::MAX);
        self.claims.get_mut(index)
    }

    pub fn claim_count(&self) -> u64 {
        self.claims.len() as u64
    }

    /// Whether the stake stopped accepting claims before `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.deadline.has_passed(now)
    }

    /// Claims still awaiting a ruling.
    pub fn open_claims(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter().filter(|c| !c.ruled)
    }

    /// Stake custody reserved for unruled claims: each may pay out at most
    /// its claim amount plus the arbiter fee. `None` on overflow.
    pub fn committed(&self) -> Option<Amount> {
        self.open_claims().try_fold(Amount::ZERO, |acc, c| {
            acc.checked_add(c.claim_amount)?.checked_add(self.arbiter_fee)
        })
    }

    /// Stake custody not yet reserved for any unruled claim.
    pub fn uncommitted(&self) -> Option<Amount> {
        self.custody.checked_sub(self.committed()?)
    }

    /// Deposits held for unruled claims, `None` on overflow.
    pub fn open_deposits(&self) -> Option<Amount> {
        self.open_claims()
            .try_fold(Amount::ZERO, |acc, c| acc.checked_add(c.deposit))
    }
}
