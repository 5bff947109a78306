use stake_custody::CustodyError;
use stake_fees::FeeError;
use stake_types::{Amount, ClaimId, Identity, StakeId, Timestamp};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("invalid stake terms: {0}")]
    InvalidTerms(String),

    #[error("invalid claim amount {amount}: must be in 1..={max}")]
    InvalidClaim { amount: Amount, max: Amount },

    #[error("insufficient deposit: need {required}, attached {attached}")]
    InsufficientDeposit { required: Amount, attached: Amount },

    #[error("over-deposit: need {required}, attached {attached}")]
    OverDeposit { required: Amount, attached: Amount },

    #[error("{kind} {index} out of range ({len} exist)")]
    OutOfRange {
        kind: &'static str,
        index: u64,
        len: u64,
    },

    #[error("{caller} is not arbiter #{arbiter_index} of stake {stake_id}")]
    NotAuthorized {
        stake_id: StakeId,
        arbiter_index: usize,
        caller: Identity,
    },

    #[error("claim {claim_id} on stake {stake_id} has already been ruled")]
    AlreadyRuled { stake_id: StakeId, claim_id: ClaimId },

    #[error("stake {stake_id} expired at {deadline} (now {now})")]
    StakeExpired {
        stake_id: StakeId,
        deadline: Timestamp,
        now: Timestamp,
    },

    #[error("stake {stake_id} custody {available} cannot cover {needed}")]
    InsufficientCustody {
        stake_id: StakeId,
        needed: Amount,
        available: Amount,
    },

    #[error("arithmetic overflow in ledger accounting")]
    Overflow,

    #[error("custody error: {0}")]
    Custody(#[from] CustodyError),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl From<FeeError> for LedgerError {
    fn from(e: FeeError) -> Self {
        match e {
            FeeError::InvalidTerms { reason } => Self::InvalidTerms(reason),
            FeeError::InvalidClaim { amount, max } => Self::InvalidClaim { amount, max },
            FeeError::InsufficientDeposit { required, attached } => {
                Self::InsufficientDeposit { required, attached }
            }
            FeeError::OverDeposit { required, attached } => Self::OverDeposit { required, attached },
            FeeError::Overflow => Self::Overflow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_errors_keep_their_bounds() {
        let err = LedgerError::from(FeeError::InvalidClaim {
            amount: Amount::new(1799),
            max: Amount::new(1798),
        });
        assert_eq!(
            err,
            LedgerError::InvalidClaim {
                amount: Amount::new(1799),
                max: Amount::new(1798),
            }
        );
        assert_eq!(err.to_string(), "invalid claim amount 1799: must be in 1..=1798");
    }
}
