use stake_types::{Amount, Identity};

use crate::error::CustodyError;
use crate::payout::Payout;

/// Value-transfer primitive the ledger calls into.
///
/// Both operations are all-or-nothing: on `Err` the backend must be left
/// exactly as it was before the call.
pub trait ValueTransfer {
    /// Move `amount` from `from` into ledger custody.
    fn absorb(&mut self, from: &Identity, amount: Amount) -> Result<(), CustodyError>;

    /// Release every payout in the batch, or none of them.
    fn release(&mut self, payouts: &[Payout]) -> Result<(), CustodyError>;

    /// Total value currently held in ledger custody.
    fn held(&self) -> Amount;
}

impl<T: ValueTransfer + ?Sized> ValueTransfer for Box<T> {
    fn absorb(&mut self, from: &Identity, amount: Amount) -> Result<(), CustodyError> {
        (**self).absorb(from, amount)
    }

    fn release(&mut self, payouts: &[Payout]) -> Result<(), CustodyError> {
        (**self).release(payouts)
    }

    fn held(&self) -> Amount {
        (**self).held()
    }
}
