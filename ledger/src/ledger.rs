//! The staking ledger: the stake sequence plus its custody backend.

use std::collections::HashSet;

use stake_custody::ValueTransfer;
use stake_fees::{check_attached, validate_stake_terms};
use stake_types::{Amount, ClaimId, StakeId};

use crate::claim::Claim;
use crate::config::LedgerConfig;
use crate::context::CallContext;
use crate::error::LedgerError;
use crate::stake::{NewStake, Stake};

/// Append-only stake ledger over a value-transfer backend.
///
/// Operations take `&mut self` and run to completion, so calls are totally
/// ordered. Each mutating operation validates everything, performs a single
/// custody call, and only then writes records; a failure at any step leaves
/// the ledger and the backend untouched.
pub struct StakingLedger<V: ValueTransfer> {
    pub(crate) stakes: Vec<Stake>,
    pub(crate) custody: V,
    pub(crate) config: LedgerConfig,
}

impl<V: ValueTransfer> StakingLedger<V> {
    pub fn new(custody: V) -> Self {
        Self::with_config(custody, LedgerConfig::default())
    }

    pub fn with_config(custody: V, config: LedgerConfig) -> Self {
        Self {
            stakes: Vec::new(),
            custody,
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The custody backend.
    pub fn custody(&self) -> &V {
        &self.custody
    }

    /// Mutable access to the backend, for funding participants from outside
    /// the ledger. Moving value held in ledger custody through this handle
    /// breaks [`StakingLedger::is_balanced`].
    pub fn custody_mut(&mut self) -> &mut V {
        &mut self.custody
    }

    pub fn into_custody(self) -> V {
        self.custody
    }

    /// Lock `terms.stake_amount` behind the named arbiters.
    ///
    /// The attached value must equal the stake amount exactly.
    pub fn create_stake(&mut self, ctx: &CallContext, terms: NewStake) -> Result<StakeId, LedgerError> {
        let result = self.try_create_stake(ctx, terms);
        if let Err(e) = &result {
            tracing::debug!(caller = %ctx.caller, error = %e, "create_stake rejected");
        }
        result
    }

    fn try_create_stake(&mut self, ctx: &CallContext, terms: NewStake) -> Result<StakeId, LedgerError> {
        validate_stake_terms(
            terms.stake_amount,
            terms.arbiter_fee,
            terms.griefing_fee,
            terms.arbiters.len(),
            terms.deadline,
            ctx.now,
        )?;
        validate_identities(&terms)?;
        check_attached(terms.stake_amount, ctx.attached)?;

        self.custody.absorb(&ctx.caller, ctx.attached)?;

        let id = self.stake_count();
        tracing::info!(
            stake_id = id,
            staker = %terms.staker,
            funder = %ctx.caller,
            amount = %terms.stake_amount,
            arbiters = terms.arbiters.len(),
            "stake created"
        );
        self.stakes
            .push(Stake::from_terms(id, ctx.caller.clone(), terms, ctx.now));
        Ok(id)
    }

    /// Read-only view of a stake.
    pub fn get_stake(&self, stake_id: StakeId) -> Result<&Stake, LedgerError> {
        usize::try_from(stake_id)
            .ok()
            .and_then(|i| self.stakes.get(i))
            .ok_or(LedgerError::OutOfRange {
                kind: "stake",
                index: stake_id,
                len: self.stake_count(),
            })
    }

    pub(crate) fn stake_mut(&mut self, stake_id: StakeId) -> Result<&mut Stake, LedgerError> {
        let len = self.stake_count();
        let index = usize::try_from(stake_id).unwrap_or(usize::MAX);
        self.stakes
            .get_mut(index)
            .ok_or(LedgerError::OutOfRange {
                kind: "stake",
                index: stake_id,
                len,
            })
    }

    /// Number of stakes ever created.
    pub fn stake_count(&self) -> u64 {
        self.stakes.len() as u64
    }

    pub fn stakes(&self) -> impl Iterator<Item = &Stake> {
        self.stakes.iter()
    }

    pub fn get_claim(&self, stake_id: StakeId, claim_id: ClaimId) -> Result<&Claim, LedgerError> {
        let stake = self.get_stake(stake_id)?;
        stake.claim(claim_id).ok_or(LedgerError::OutOfRange {
            kind: "claim",
            index: claim_id,
            len: stake.claim_count(),
        })
    }

    pub fn claim_count(&self, stake_id: StakeId) -> Result<u64, LedgerError> {
        Ok(self.get_stake(stake_id)?.claim_count())
    }

    /// Value the ledger accounts for: every stake's custody plus deposits of
    /// unruled claims.
    pub fn total_custody(&self) -> Result<Amount, LedgerError> {
        self.stakes.iter().try_fold(Amount::ZERO, |acc, stake| {
            stake
                .open_deposits()
                .and_then(|d| d.checked_add(stake.custody))
                .and_then(|s| acc.checked_add(s))
                .ok_or(LedgerError::Overflow)
        })
    }

    /// Whether the ledger's own accounting matches what the backend holds.
    pub fn is_balanced(&self) -> bool {
        self.total_custody()
            .map(|total| total == self.custody.held())
            .unwrap_or(false)
    }
}

/// Staker and arbiters must be non-blank; arbiters must be distinct.
fn validate_identities(terms: &NewStake) -> Result<(), LedgerError> {
    if !terms.staker.is_valid() {
        return Err(LedgerError::InvalidTerms("staker identity is blank".into()));
    }
    let mut seen = HashSet::new();
    for (index, arbiter) in terms.arbiters.iter().enumerate() {
        if !arbiter.is_valid() {
            return Err(LedgerError::InvalidTerms(format!(
                "arbiter #{index} identity is blank"
            )));
        }
        if !seen.insert(arbiter) {
            return Err(LedgerError::InvalidTerms(format!(
                "arbiter {arbiter} is named more than once"
            )));
        }
    }
    Ok(())
}
