//! Ledger snapshots — capture every stake and claim at a point in time.
//!
//! A durable-storage collaborator persists the snapshot bytes; the ledger only
//! produces and consumes them. The snapshot hash is computed deterministically
//! from the stake records so a restored ledger can be checked for tampering.

use serde::{Deserialize, Serialize};

use stake_custody::ValueTransfer;
use stake_types::Timestamp;

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::ledger::StakingLedger;
use crate::stake::Stake;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A ledger snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Blake2b-256 of the serialized stakes and stake count.
    pub hash: [u8; 32],
    pub stake_count: u64,
    /// Not covered by the hash.
    pub created_at: Timestamp,
    pub stakes: Vec<Stake>,
    pub version: u32,
}

impl LedgerSnapshot {
    /// Create a snapshot from a list of stakes.
    pub fn create(stakes: Vec<Stake>, created_at: Timestamp) -> Result<Self, LedgerError> {
        let mut snap = Self {
            hash: [0u8; 32],
            stake_count: stakes.len() as u64,
            created_at,
            stakes,
            version: SNAPSHOT_VERSION,
        };
        snap.hash = snap.compute_hash()?;
        Ok(snap)
    }

    fn compute_hash(&self) -> Result<[u8; 32], LedgerError> {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let body = bincode::serialize(&self.stakes).map_err(|e| LedgerError::Snapshot(e.to_string()))?;
        let mut hasher = Blake2b::<U32>::new();
        hasher.update(&self.version.to_le_bytes());
        hasher.update(&self.stake_count.to_le_bytes());
        hasher.update(&body);

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        Ok(out)
    }

    /// Verify the snapshot hash matches the stake data.
    pub fn verify(&self) -> bool {
        self.compute_hash().map(|h| h == self.hash).unwrap_or(false)
    }

    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(self).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    /// Deserialize a snapshot from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        bincode::deserialize(bytes).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    /// Check the version, hash, positional ids and claim reservations.
    fn check(&self) -> Result<(), LedgerError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(LedgerError::Snapshot(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }
        if !self.verify() {
            return Err(LedgerError::Snapshot("hash mismatch".into()));
        }
        if self.stake_count != self.stakes.len() as u64 {
            return Err(LedgerError::Snapshot(format!(
                "stake count {} does not match {} records",
                self.stake_count,
                self.stakes.len()
            )));
        }
        for (i, stake) in self.stakes.iter().enumerate() {
            if stake.id != i as u64 {
                return Err(LedgerError::Snapshot(format!(
                    "stake at position {i} carries id {}",
                    stake.id
                )));
            }
            if let Some((j, claim)) = stake
                .claims
                .iter()
                .enumerate()
                .find(|(j, c)| c.id != *j as u64)
            {
                return Err(LedgerError::Snapshot(format!(
                    "stake {i}: claim at position {j} carries id {}",
                    claim.id
                )));
            }
            if stake.uncommitted().is_none() {
                return Err(LedgerError::Snapshot(format!(
                    "stake {i}: open claims reserve more than its custody {}",
                    stake.custody
                )));
            }
        }
        Ok(())
    }
}

impl<V: ValueTransfer> StakingLedger<V> {
    /// Capture every stake and claim.
    pub fn snapshot(&self, now: Timestamp) -> Result<LedgerSnapshot, LedgerError> {
        LedgerSnapshot::create(self.stakes.clone(), now)
    }

    /// Rebuild a ledger from a verified snapshot over `custody`.
    ///
    /// The backend must already hold exactly what the snapshot accounts for.
    pub fn restore(
        snapshot: LedgerSnapshot,
        custody: V,
        config: LedgerConfig,
    ) -> Result<Self, LedgerError> {
        snapshot.check()?;
        let ledger = Self {
            stakes: snapshot.stakes,
            custody,
            config,
        };
        let total = ledger.total_custody()?;
        if total != ledger.custody.held() {
            return Err(LedgerError::Snapshot(format!(
                "snapshot accounts for {total}, custody holds {}",
                ledger.custody.held()
            )));
        }
        tracing::info!(stakes = ledger.stake_count(), "ledger restored from snapshot");
        Ok(ledger)
    }
}
