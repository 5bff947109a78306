use stake_types::{Amount, Identity};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustodyError {
    #[error("{account} cannot fund {needed}: only {available} available")]
    InsufficientFunds {
        account: Identity,
        needed: Amount,
        available: Amount,
    },

    #[error("custody holds {held}, cannot release {needed}")]
    InsufficientCustody { needed: Amount, held: Amount },

    #[error("arithmetic overflow in custody backend")]
    Overflow,

    #[error("custody backend error: {0}")]
    Backend(String),
}
