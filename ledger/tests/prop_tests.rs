use proptest::prelude::*;

use stake_ledger::{plan_settlement, CallContext, ForfeitPolicy, LedgerConfig, NewStake, StakingLedger};
use stake_nullables::NullCustody;
use stake_types::{Amount, Identity, Timestamp};

const PARTICIPANTS: u8 = 6;
const NOW: Timestamp = Timestamp::new(1_000);

fn who(n: u8) -> Identity {
    Identity::new(format!("p{}", n % PARTICIPANTS))
}

#[derive(Clone, Debug)]
enum Op {
    Create {
        funder: u8,
        stake: u128,
        arbiter_fee: u128,
        griefing_fee: u128,
        attached_delta: i8,
    },
    Open {
        claimant: u8,
        stake_id: u64,
        amount: u128,
        attached_delta: i8,
    },
    Rule {
        caller: u8,
        stake_id: u64,
        claim_id: u64,
        arbiter_index: usize,
        correct: bool,
    },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..PARTICIPANTS, 0u128..2_000, 0u128..200, 0u128..200, -1i8..=1).prop_map(
            |(funder, stake, arbiter_fee, griefing_fee, attached_delta)| Op::Create {
                funder,
                stake,
                arbiter_fee,
                griefing_fee,
                attached_delta,
            }
        ),
        (0u8..PARTICIPANTS, 0u64..4, 0u128..2_000, -1i8..=1).prop_map(
            |(claimant, stake_id, amount, attached_delta)| Op::Open {
                claimant,
                stake_id,
                amount,
                attached_delta,
            }
        ),
        (0u8..PARTICIPANTS, 0u64..4, 0u64..4, 0usize..3, any::<bool>()).prop_map(
            |(caller, stake_id, claim_id, arbiter_index, correct)| Op::Rule {
                caller,
                stake_id,
                claim_id,
                arbiter_index,
                correct,
            }
        ),
    ]
}

fn adjust(base: u128, delta: i8) -> Amount {
    Amount::new(match delta {
        d if d < 0 => base.saturating_sub(1),
        0 => base,
        _ => base + 1,
    })
}

fn policy_strategy() -> impl Strategy<Value = ForfeitPolicy> {
    prop_oneof![
        Just(ForfeitPolicy::Split),
        Just(ForfeitPolicy::ArbiterTakesAll),
        Just(ForfeitPolicy::StakerTakesAll),
    ]
}

fn apply(ledger: &mut StakingLedger<NullCustody>, op: &Op) -> bool {
    match op.clone() {
        Op::Create {
            funder,
            stake,
            arbiter_fee,
            griefing_fee,
            attached_delta,
        } => {
            let terms = NewStake {
                staker: who(funder + 1),
                arbiters: vec![who(0), who(1), who(2)],
                stake_amount: Amount::new(stake),
                arbiter_fee: Amount::new(arbiter_fee),
                griefing_fee: Amount::new(griefing_fee),
                deadline: Timestamp::new(5_000),
                metadata: Vec::new(),
            };
            let ctx = CallContext::new(who(funder), adjust(stake, attached_delta), NOW);
            ledger.create_stake(&ctx, terms).is_ok()
        }
        Op::Open {
            claimant,
            stake_id,
            amount,
            attached_delta,
        } => {
            let griefing = ledger
                .get_stake(stake_id)
                .map(|s| s.griefing_fee.raw())
                .unwrap_or(0);
            let ctx = CallContext::new(who(claimant), adjust(amount + 2 * griefing, attached_delta), NOW);
            ledger
                .open_claim(&ctx, stake_id, Amount::new(amount), Vec::new())
                .is_ok()
        }
        Op::Rule {
            caller,
            stake_id,
            claim_id,
            arbiter_index,
            correct,
        } => {
            let ctx = CallContext::call(who(caller), NOW);
            ledger
                .rule_on_claim(&ctx, stake_id, claim_id, arbiter_index, correct, Vec::new())
                .is_ok()
        }
    }
}

proptest! {
    /// Ledger accounting matches custody, and no value is created or destroyed,
    /// across arbitrary operation sequences.
    #[test]
    fn custody_is_conserved(
        ops in prop::collection::vec(op_strategy(), 1..40),
        policy in policy_strategy(),
    ) {
        let mut custody = NullCustody::new();
        for n in 0..PARTICIPANTS {
            custody.fund(&who(n), Amount::new(50_000)).unwrap();
        }
        let total = Amount::new(50_000 * PARTICIPANTS as u128);
        let config = LedgerConfig { forfeit_policy: policy, ..LedgerConfig::default() };
        let mut ledger = StakingLedger::with_config(custody, config);

        for op in &ops {
            apply(&mut ledger, op);
            prop_assert!(ledger.is_balanced());
            let free: Amount = ledger.custody().balances().values().copied().sum();
            prop_assert_eq!(free + ledger.custody().held(), total);
        }
    }

    /// Rejected operations change nothing observable.
    #[test]
    fn rejected_operations_have_no_effect(
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut custody = NullCustody::new();
        for n in 0..PARTICIPANTS {
            custody.fund(&who(n), Amount::new(50_000)).unwrap();
        }
        let mut ledger = StakingLedger::new(custody);

        for op in &ops {
            let before = ledger.snapshot(NOW).unwrap();
            let balances = ledger.custody().balances().clone();
            let held = ledger.custody().held();
            if !apply(&mut ledger, op) {
                let after = ledger.snapshot(NOW).unwrap();
                prop_assert_eq!(before.hash, after.hash);
                prop_assert_eq!(ledger.custody().balances(), &balances);
                prop_assert_eq!(ledger.custody().held(), held);
            }
        }
    }

    /// Claims never exceed the ceiling and rulings are write-once.
    #[test]
    fn recorded_claims_respect_invariants(
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut custody = NullCustody::new();
        for n in 0..PARTICIPANTS {
            custody.fund(&who(n), Amount::new(50_000)).unwrap();
        }
        let mut ledger = StakingLedger::new(custody);
        for op in &ops {
            apply(&mut ledger, op);
        }

        for stake in ledger.stakes() {
            prop_assert!(stake.arbiter_fee.raw() + stake.griefing_fee.raw() < stake.stake_amount.raw());
            let max = stake.fees().max_claim().unwrap();
            for claim in &stake.claims {
                prop_assert!(!claim.claim_amount.is_zero());
                prop_assert!(claim.claim_amount <= max);
                prop_assert_eq!(claim.arbiter.is_some(), claim.ruled);
                if let Some(arbiter) = &claim.arbiter {
                    prop_assert!(stake.arbiters.contains(arbiter));
                }
            }
        }
    }

    /// Every accepted claim stays settleable whichever way it is ruled.
    #[test]
    fn open_claims_can_always_be_settled(
        ops in prop::collection::vec(op_strategy(), 1..60),
        policy in policy_strategy(),
    ) {
        let mut custody = NullCustody::new();
        for n in 0..PARTICIPANTS {
            custody.fund(&who(n), Amount::new(50_000)).unwrap();
        }
        let config = LedgerConfig { forfeit_policy: policy, ..LedgerConfig::default() };
        let mut ledger = StakingLedger::with_config(custody, config);
        for op in &ops {
            apply(&mut ledger, op);
        }

        for stake in ledger.stakes() {
            prop_assert!(stake.uncommitted().is_some());
            for claim in stake.open_claims() {
                for correct in [true, false] {
                    prop_assert!(plan_settlement(stake, claim, &stake.arbiters[0], correct, policy).is_ok());
                }
            }
        }
    }
}
