use stake_types::Amount;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeError {
    #[error("invalid stake terms: {reason}")]
    InvalidTerms { reason: String },

    #[error("invalid claim amount {amount}: must be in 1..={max}")]
    InvalidClaim { amount: Amount, max: Amount },

    #[error("insufficient deposit: need {required}, attached {attached}")]
    InsufficientDeposit { required: Amount, attached: Amount },

    #[error("over-deposit: need {required}, attached {attached}")]
    OverDeposit { required: Amount, attached: Amount },

    #[error("arithmetic overflow in fee computation")]
    Overflow,
}
