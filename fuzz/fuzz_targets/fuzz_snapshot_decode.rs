#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes must never panic, and a decoded snapshot must
    // survive hash verification without panicking either.
    if let Ok(snap) = stake_ledger::LedgerSnapshot::from_bytes(data) {
        let _ = snap.verify();
    }

    let _ = bincode::deserialize::<stake_ledger::Stake>(data);
    let _ = bincode::deserialize::<stake_types::Amount>(data);
    let _ = bincode::deserialize::<stake_types::Timestamp>(data);
});
