//! Per-call context handed to every mutating operation.

use stake_types::{Amount, Identity, Timestamp};

/// Who is calling, what value they attached, and the time source's reading.
///
/// The identity is already authenticated by the enclosing runtime. Attached
/// value is only absorbed into custody once the call is accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Identity,
    pub attached: Amount,
    pub now: Timestamp,
}

impl CallContext {
    pub fn new(caller: impl Into<Identity>, attached: Amount, now: Timestamp) -> Self {
        Self {
            caller: caller.into(),
            attached,
            now,
        }
    }

    /// A call carrying no value.
    pub fn call(caller: impl Into<Identity>, now: Timestamp) -> Self {
        Self::new(caller, Amount::ZERO, now)
    }
}
