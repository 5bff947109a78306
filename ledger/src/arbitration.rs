//! Claim opening and arbiter rulings.

use stake_custody::ValueTransfer;
use stake_fees::{check_attached, validate_claim_amount};
use stake_types::{Amount, ClaimId, StakeId};

use crate::claim::Claim;
use crate::context::CallContext;
use crate::error::LedgerError;
use crate::ledger::StakingLedger;
use crate::settlement::{plan_settlement, Settlement};

impl<V: ValueTransfer> StakingLedger<V> {
    /// Open a claim for `claim_amount` against a stake.
    ///
    /// Checks run in order: the stake exists, it has not expired (when
    /// configured), the amount is within `1..=max_claim`, the attached
    /// value equals `claim_amount + 2 × griefing_fee` exactly, and the
    /// stake's unreserved custody covers `claim_amount + arbiter_fee`.
    pub fn open_claim(
        &mut self,
        ctx: &CallContext,
        stake_id: StakeId,
        claim_amount: Amount,
        metadata: Vec<u8>,
    ) -> Result<ClaimId, LedgerError> {
        let result = self.try_open_claim(ctx, stake_id, claim_amount, metadata);
        if let Err(e) = &result {
            tracing::debug!(stake_id, caller = %ctx.caller, error = %e, "open_claim rejected");
        }
        result
    }

    fn try_open_claim(
        &mut self,
        ctx: &CallContext,
        stake_id: StakeId,
        claim_amount: Amount,
        metadata: Vec<u8>,
    ) -> Result<ClaimId, LedgerError> {
        let stake = self.get_stake(stake_id)?;

        if self.config.reject_expired_claims && stake.is_expired(ctx.now) {
            return Err(LedgerError::StakeExpired {
                stake_id,
                deadline: stake.deadline,
                now: ctx.now,
            });
        }

        let fees = stake.fees();
        validate_claim_amount(claim_amount, fees.max_claim()?)?;
        let deposit = fees.claim_deposit(claim_amount)?;
        check_attached(deposit, ctx.attached)?;

        // Reserve the worst-case outflow so the claim can always be ruled.
        let needed = claim_amount
            .checked_add(stake.arbiter_fee)
            .ok_or(LedgerError::Overflow)?;
        let available = stake.uncommitted().ok_or(LedgerError::Overflow)?;
        if needed > available {
            return Err(LedgerError::InsufficientCustody {
                stake_id,
                needed,
                available,
            });
        }

        self.custody.absorb(&ctx.caller, deposit)?;

        let stake = self.stake_mut(stake_id)?;
        let claim_id = stake.claim_count();
        stake.claims.push(Claim::open(
            claim_id,
            ctx.caller.clone(),
            claim_amount,
            deposit,
            metadata,
            ctx.now,
        ));
        tracing::info!(
            stake_id,
            claim_id,
            claimant = %ctx.caller,
            amount = %claim_amount,
            deposit = %deposit,
            "claim opened"
        );
        Ok(claim_id)
    }

    /// Rule on a claim as the arbiter declared at `arbiter_index`.
    ///
    /// A ruling is write-once. The settlement is released from custody before
    /// the ruling is recorded; if the release fails nothing is recorded.
    pub fn rule_on_claim(
        &mut self,
        ctx: &CallContext,
        stake_id: StakeId,
        claim_id: ClaimId,
        arbiter_index: usize,
        correct: bool,
        metadata: Vec<u8>,
    ) -> Result<Settlement, LedgerError> {
        let result = self.try_rule_on_claim(ctx, stake_id, claim_id, arbiter_index, correct, metadata);
        if let Err(e) = &result {
            tracing::debug!(stake_id, claim_id, caller = %ctx.caller, error = %e, "rule_on_claim rejected");
        }
        result
    }

    fn try_rule_on_claim(
        &mut self,
        ctx: &CallContext,
        stake_id: StakeId,
        claim_id: ClaimId,
        arbiter_index: usize,
        correct: bool,
        metadata: Vec<u8>,
    ) -> Result<Settlement, LedgerError> {
        let stake = self.get_stake(stake_id)?;
        let claim = self.get_claim(stake_id, claim_id)?;

        if claim.ruled {
            return Err(LedgerError::AlreadyRuled { stake_id, claim_id });
        }
        if stake.arbiter(arbiter_index) != Some(&ctx.caller) {
            return Err(LedgerError::NotAuthorized {
                stake_id,
                arbiter_index,
                caller: ctx.caller.clone(),
            });
        }
        // Rulings move value out of custody only.
        check_attached(Amount::ZERO, ctx.attached)?;

        let settlement = plan_settlement(stake, claim, &ctx.caller, correct, self.config.forfeit_policy)?;
        self.custody.release(&settlement.payouts)?;

        let stake = self.stake_mut(stake_id)?;
        stake.custody = settlement.custody_after;
        let claim = stake.claim_mut(claim_id).ok_or(LedgerError::OutOfRange {
            kind: "claim",
            index: claim_id,
            len: 0,
        })?;
        claim.record_ruling(ctx.caller.clone(), correct, metadata, ctx.now);

        tracing::info!(
            stake_id,
            claim_id,
            arbiter = %ctx.caller,
            correct,
            custody = %settlement.custody_after,
            "claim ruled"
        );
        Ok(settlement)
    }
}
