//! Nullable custody — an in-memory balance book implementing `ValueTransfer`.

use serde::Serialize;
use stake_custody::{CustodyError, Payout, ValueTransfer};
use stake_types::{Amount, Identity};
use std::collections::BTreeMap;

/// A recorded value movement, in call order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Movement {
    Absorbed { from: Identity, amount: Amount },
    Released(Payout),
}

/// An in-memory custody backend for testing.
///
/// Participants hold free balances; the ledger's custody is a single pool.
/// A release batch can be made to fail once with [`NullCustody::fail_next_release`]
/// to exercise rollback paths.
#[derive(Debug, Default)]
pub struct NullCustody {
    balances: BTreeMap<Identity, Amount>,
    held: Amount,
    movements: Vec<Movement>,
    fail_next_release: bool,
}

impl NullCustody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style initial balance. Replaces any earlier balance for `account`.
    pub fn with_balance(mut self, account: impl Into<Identity>, amount: u128) -> Self {
        self.balances.insert(account.into(), Amount::new(amount));
        self
    }

    /// Credit a participant's free balance from outside the ledger.
    pub fn fund(&mut self, account: &Identity, amount: Amount) -> Result<(), CustodyError> {
        let credited = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(CustodyError::Overflow)?;
        self.balances.insert(account.clone(), credited);
        Ok(())
    }

    /// Value currently held in custody.
    pub fn held(&self) -> Amount {
        self.held
    }

    /// Free balance of a participant.
    pub fn balance_of(&self, account: &Identity) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// All movements made so far.
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// Every participant's free balance.
    pub fn balances(&self) -> &BTreeMap<Identity, Amount> {
        &self.balances
    }

    /// Make the next `release` call fail without moving anything.
    pub fn fail_next_release(&mut self) {
        self.fail_next_release = true;
    }
}

impl ValueTransfer for NullCustody {
    fn absorb(&mut self, from: &Identity, amount: Amount) -> Result<(), CustodyError> {
        let available = self.balance_of(from);
        let remaining = available
            .checked_sub(amount)
            .ok_or_else(|| CustodyError::InsufficientFunds {
                account: from.clone(),
                needed: amount,
                available,
            })?;
        let held = self.held.checked_add(amount).ok_or(CustodyError::Overflow)?;
        self.balances.insert(from.clone(), remaining);
        self.held = held;
        self.movements.push(Movement::Absorbed {
            from: from.clone(),
            amount,
        });
        Ok(())
    }

    fn release(&mut self, payouts: &[Payout]) -> Result<(), CustodyError> {
        if self.fail_next_release {
            self.fail_next_release = false;
            return Err(CustodyError::Backend("injected release failure".into()));
        }
        let total = Payout::total(payouts).ok_or(CustodyError::Overflow)?;
        let held = self
            .held
            .checked_sub(total)
            .ok_or(CustodyError::InsufficientCustody {
                needed: total,
                held: self.held,
            })?;
        let mut credited: BTreeMap<Identity, Amount> = BTreeMap::new();
        for payout in payouts {
            let current = match credited.get(&payout.recipient) {
                Some(amount) => *amount,
                None => self.balance_of(&payout.recipient),
            };
            let next = current.checked_add(payout.amount).ok_or(CustodyError::Overflow)?;
            credited.insert(payout.recipient.clone(), next);
        }

        self.held = held;
        self.balances.extend(credited);
        self.movements
            .extend(payouts.iter().cloned().map(Movement::Released));
        Ok(())
    }

    fn held(&self) -> Amount {
        NullCustody::held(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stake_custody::PayoutReason;

    fn id(name: &str) -> Identity {
        Identity::new(name)
    }

    #[test]
    fn absorb_moves_value_into_custody() {
        let mut custody = NullCustody::new().with_balance("alice", 100);
        custody.absorb(&id("alice"), Amount::new(40)).unwrap();
        assert_eq!(custody.balance_of(&id("alice")), Amount::new(60));
        assert_eq!(custody.held(), Amount::new(40));
        assert_eq!(custody.movements().len(), 1);
    }

    #[test]
    fn absorb_beyond_balance_changes_nothing() {
        let mut custody = NullCustody::new().with_balance("alice", 10);
        let err = custody.absorb(&id("alice"), Amount::new(11)).unwrap_err();
        assert!(matches!(err, CustodyError::InsufficientFunds { .. }));
        assert_eq!(custody.balance_of(&id("alice")), Amount::new(10));
        assert_eq!(custody.held(), Amount::ZERO);
        assert!(custody.movements().is_empty());
    }

    #[test]
    fn release_is_all_or_nothing() {
        let mut custody = NullCustody::new().with_balance("alice", 50);
        custody.absorb(&id("alice"), Amount::new(50)).unwrap();

        let too_much = vec![
            Payout::new(id("bob"), Amount::new(30), PayoutReason::ClaimAward),
            Payout::new(id("carol"), Amount::new(30), PayoutReason::ArbiterFee),
        ];
        assert!(custody.release(&too_much).is_err());
        assert_eq!(custody.held(), Amount::new(50));
        assert_eq!(custody.balance_of(&id("bob")), Amount::ZERO);

        let ok = vec![
            Payout::new(id("bob"), Amount::new(30), PayoutReason::ClaimAward),
            Payout::new(id("carol"), Amount::new(20), PayoutReason::ArbiterFee),
        ];
        custody.release(&ok).unwrap();
        assert_eq!(custody.held(), Amount::ZERO);
        assert_eq!(custody.balance_of(&id("bob")), Amount::new(30));
        assert_eq!(custody.balance_of(&id("carol")), Amount::new(20));
    }

    #[test]
    fn fund_rejects_overflow() {
        let mut custody = NullCustody::new().with_balance("alice", u128::MAX - 1);
        custody.fund(&id("alice"), Amount::new(1)).unwrap();
        let err = custody.fund(&id("alice"), Amount::new(1)).unwrap_err();
        assert_eq!(err, CustodyError::Overflow);
        assert_eq!(custody.balance_of(&id("alice")), Amount::new(u128::MAX));
    }

    #[test]
    fn release_overflowing_a_recipient_changes_nothing() {
        let mut custody = NullCustody::new()
            .with_balance("alice", 10)
            .with_balance("bob", u128::MAX - 5);
        custody.absorb(&id("alice"), Amount::new(10)).unwrap();

        let payouts = [
            Payout::new(id("bob"), Amount::new(4), PayoutReason::ClaimAward),
            Payout::new(id("bob"), Amount::new(4), PayoutReason::ArbiterFee),
        ];
        let err = custody.release(&payouts).unwrap_err();
        assert_eq!(err, CustodyError::Overflow);
        assert_eq!(custody.held(), Amount::new(10));
        assert_eq!(custody.balance_of(&id("bob")), Amount::new(u128::MAX - 5));
        assert_eq!(custody.movements().len(), 1);
    }

    #[test]
    fn injected_failure_fires_once() {
        let mut custody = NullCustody::new().with_balance("alice", 5);
        custody.absorb(&id("alice"), Amount::new(5)).unwrap();
        custody.fail_next_release();
        let payout = [Payout::new(id("alice"), Amount::new(5), PayoutReason::DepositRefund)];
        assert!(custody.release(&payout).is_err());
        assert_eq!(custody.held(), Amount::new(5));
        custody.release(&payout).unwrap();
        assert_eq!(custody.balance_of(&id("alice")), Amount::new(5));
    }
}
