//! Staking and arbitration ledger.
//!
//! Stakers lock value behind a stake that names one or more arbiters. Anyone
//! may open a claim against a stake by attaching a deposit; a named arbiter
//! rules on the claim once, and the ruling settles custody.
//!
//! Every operation validates first and commits second: a rejected call leaves
//! no record and moves no value.

pub mod arbitration;
pub mod claim;
pub mod config;
pub mod context;
pub mod error;
pub mod ledger;
pub mod settlement;
pub mod snapshot;
pub mod stake;

pub use claim::Claim;
pub use config::LedgerConfig;
pub use context::CallContext;
pub use error::LedgerError;
pub use ledger::StakingLedger;
pub use settlement::{plan_settlement, ForfeitPolicy, Settlement};
pub use snapshot::LedgerSnapshot;
pub use stake::{NewStake, Stake};
