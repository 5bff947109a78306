#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use stake_ledger::{CallContext, NewStake, StakingLedger};
use stake_nullables::NullCustody;
use stake_types::{Amount, Identity, Timestamp};

#[derive(Arbitrary, Debug)]
enum Op {
    Create { who: u8, stake: u32, arbiter_fee: u32, griefing_fee: u32, attached: u32 },
    Open { who: u8, stake_id: u8, amount: u32, attached: u32 },
    Rule { who: u8, stake_id: u8, claim_id: u8, index: u8, correct: bool },
}

fn who(n: u8) -> Identity {
    Identity::new(format!("p{}", n % 4))
}

// Arbitrary call sequences keep ledger accounting equal to custody.
fuzz_target!(|ops: Vec<Op>| {
    let mut custody = NullCustody::new();
    for n in 0..4 {
        custody.fund(&who(n), Amount::new(u32::MAX as u128 * 64)).unwrap();
    }
    let mut ledger = StakingLedger::new(custody);
    let now = Timestamp::new(100);

    for op in ops.into_iter().take(64) {
        match op {
            Op::Create { who: w, stake, arbiter_fee, griefing_fee, attached } => {
                let terms = NewStake {
                    staker: who(w.wrapping_add(1)),
                    arbiters: vec![who(0), who(1)],
                    stake_amount: Amount::new(stake as u128),
                    arbiter_fee: Amount::new(arbiter_fee as u128),
                    griefing_fee: Amount::new(griefing_fee as u128),
                    deadline: Timestamp::new(1_000),
                    metadata: Vec::new(),
                };
                let ctx = CallContext::new(who(w), Amount::new(attached as u128), now);
                let _ = ledger.create_stake(&ctx, terms);
            }
            Op::Open { who: w, stake_id, amount, attached } => {
                let ctx = CallContext::new(who(w), Amount::new(attached as u128), now);
                let _ = ledger.open_claim(&ctx, stake_id as u64, Amount::new(amount as u128), Vec::new());
            }
            Op::Rule { who: w, stake_id, claim_id, index, correct } => {
                let ctx = CallContext::call(who(w), now);
                let _ = ledger.rule_on_claim(&ctx, stake_id as u64, claim_id as u64, index as usize, correct, Vec::new());
            }
        }
        assert!(ledger.is_balanced());
    }
});
