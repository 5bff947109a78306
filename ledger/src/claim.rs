//! Claim records.

use serde::{Deserialize, Serialize};
use stake_types::{Amount, ClaimId, Identity, Timestamp};

/// A dispute against a stake's custody.
///
/// `ruled` flips from false to true exactly once; `correct`, `arbiter`,
/// `ruling_metadata` and `ruled_at` are written at that same moment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub claimant: Identity,
    /// The ruling arbiter; `None` until ruled.
    pub arbiter: Option<Identity>,
    pub claim_amount: Amount,
    /// Value absorbed when the claim was opened.
    pub deposit: Amount,
    pub metadata: Vec<u8>,
    pub ruled: bool,
    /// Meaningless while `ruled` is false.
    pub correct: bool,
    pub ruling_metadata: Option<Vec<u8>>,
    pub opened_at: Timestamp,
    pub ruled_at: Option<Timestamp>,
}

impl Claim {
    pub(crate) fn open(
        id: ClaimId,
        claimant: Identity,
        claim_amount: Amount,
        deposit: Amount,
        metadata: Vec<u8>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            claimant,
            arbiter: None,
            claim_amount,
            deposit,
            metadata,
            ruled: false,
            correct: false,
            ruling_metadata: None,
            opened_at: now,
            ruled_at: None,
        }
    }

    pub(crate) fn record_ruling(
        &mut self,
        arbiter: Identity,
        correct: bool,
        metadata: Vec<u8>,
        now: Timestamp,
    ) {
        self.ruled = true;
        self.correct = correct;
        self.arbiter = Some(arbiter);
        self.ruling_metadata = Some(metadata);
        self.ruled_at = Some(now);
    }

    /// The ruling outcome, once there is one.
    pub fn outcome(&self) -> Option<bool> {
        self.ruled.then_some(self.correct)
    }
}
