#![no_main]

use libfuzzer_sys::fuzz_target;

use stake_fees::{max_claim_amount, required_claim_deposit, validate_stake_terms};
use stake_types::{Amount, Timestamp};

// Fee arithmetic must never panic, including at the u128 boundaries.
fuzz_target!(|input: (u128, u128, u128, u128, u8, u64, u64)| {
    let (stake, arbiter_fee, griefing_fee, claim, arbiters, deadline, now) = input;
    let stake = Amount::new(stake);
    let arbiter_fee = Amount::new(arbiter_fee);
    let griefing_fee = Amount::new(griefing_fee);

    let terms = validate_stake_terms(
        stake,
        arbiter_fee,
        griefing_fee,
        arbiters as usize,
        Timestamp::new(deadline),
        Timestamp::new(now),
    );
    let max = max_claim_amount(stake, arbiter_fee, griefing_fee);
    if terms.is_ok() {
        assert!(max.is_ok());
    }
    let _ = required_claim_deposit(Amount::new(claim), griefing_fee);
});
