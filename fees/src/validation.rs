//! Stake term and claim deposit checks.

use stake_types::{Amount, Timestamp};

use crate::error::FeeError;

/// Validate the terms of a new stake.
///
/// Fails unless `stake_amount > 0`, `arbiter_fee + griefing_fee < stake_amount`,
/// at least one arbiter is named, and `deadline` lies strictly after `now`.
pub fn validate_stake_terms(
    stake_amount: Amount,
    arbiter_fee: Amount,
    griefing_fee: Amount,
    arbiter_count: usize,
    deadline: Timestamp,
    now: Timestamp,
) -> Result<(), FeeError> {
    if stake_amount.is_zero() {
        return Err(FeeError::InvalidTerms {
            reason: "stake amount must be positive".into(),
        });
    }

    // An overflowing fee sum can never fit under the stake.
    let fees = arbiter_fee
        .checked_add(griefing_fee)
        .ok_or_else(|| FeeError::InvalidTerms {
            reason: "arbiter fee plus griefing fee overflows".into(),
        })?;
    if fees >= stake_amount {
        return Err(FeeError::InvalidTerms {
            reason: format!("fees {fees} must be below stake amount {stake_amount}"),
        });
    }

    if arbiter_count == 0 {
        return Err(FeeError::InvalidTerms {
            reason: "at least one arbiter is required".into(),
        });
    }

    if deadline <= now {
        return Err(FeeError::InvalidTerms {
            reason: format!("deadline {deadline} is not after now {now}"),
        });
    }

    Ok(())
}

/// Deposit required to open a claim: `claim_amount + 2 × griefing_fee`.
///
/// The doubled griefing fee funds the penalty paid by whichever side is
/// found wrong.
pub fn required_claim_deposit(claim_amount: Amount, griefing_fee: Amount) -> Result<Amount, FeeError> {
    griefing_fee
        .checked_mul(2)
        .and_then(|g| claim_amount.checked_add(g))
        .ok_or(FeeError::Overflow)
}

/// Largest claim a stake can accept: `stake_amount − arbiter_fee − griefing_fee`.
pub fn max_claim_amount(
    stake_amount: Amount,
    arbiter_fee: Amount,
    griefing_fee: Amount,
) -> Result<Amount, FeeError> {
    stake_amount
        .checked_sub(arbiter_fee)
        .and_then(|rest| rest.checked_sub(griefing_fee))
        .ok_or(FeeError::Overflow)
}

/// A claim must be positive and no larger than `max`.
pub fn validate_claim_amount(claim_amount: Amount, max: Amount) -> Result<(), FeeError> {
    if claim_amount.is_zero() || claim_amount > max {
        return Err(FeeError::InvalidClaim {
            amount: claim_amount,
            max,
        });
    }
    Ok(())
}

/// Attached value must equal `required` exactly.
pub fn check_attached(required: Amount, attached: Amount) -> Result<(), FeeError> {
    if attached < required {
        return Err(FeeError::InsufficientDeposit { required, attached });
    }
    if attached > required {
        return Err(FeeError::OverDeposit { required, attached });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(raw: u128) -> Amount {
        Amount::new(raw)
    }

    const NOW: Timestamp = Timestamp::new(1_700_000_000);
    const LATER: Timestamp = Timestamp::new(2_528_821_098);

    #[test]
    fn test_valid_terms_pass() {
        validate_stake_terms(amt(1818), amt(180), amt(18), 3, LATER, NOW).unwrap();
    }

    #[test]
    fn test_zero_stake_rejected() {
        let result = validate_stake_terms(amt(0), amt(0), amt(0), 3, LATER, NOW);
        assert!(matches!(result, Err(FeeError::InvalidTerms { .. })));
    }

    #[test]
    fn test_fees_equal_to_stake_rejected() {
        let result = validate_stake_terms(amt(10), amt(10), amt(10), 3, LATER, NOW);
        assert!(matches!(result, Err(FeeError::InvalidTerms { .. })));

        // Exactly equal is still rejected; one below passes.
        assert!(validate_stake_terms(amt(20), amt(10), amt(10), 1, LATER, NOW).is_err());
        assert!(validate_stake_terms(amt(21), amt(10), amt(10), 1, LATER, NOW).is_ok());
    }

    #[test]
    fn test_overflowing_fees_rejected() {
        let result = validate_stake_terms(amt(u128::MAX), amt(u128::MAX), amt(1), 1, LATER, NOW);
        assert!(matches!(result, Err(FeeError::InvalidTerms { .. })));
    }

    #[test]
    fn test_no_arbiters_rejected() {
        let result = validate_stake_terms(amt(1818), amt(10), amt(10), 0, LATER, NOW);
        assert!(matches!(result, Err(FeeError::InvalidTerms { .. })));
    }

    #[test]
    fn test_past_deadline_rejected() {
        let result = validate_stake_terms(amt(1818), amt(10), amt(10), 3, Timestamp::new(10), NOW);
        assert!(matches!(result, Err(FeeError::InvalidTerms { .. })));

        let result = validate_stake_terms(amt(1818), amt(10), amt(10), 3, NOW, NOW);
        assert!(matches!(result, Err(FeeError::InvalidTerms { .. })));
    }

    #[test]
    fn test_claim_deposit_doubles_griefing_fee() {
        assert_eq!(required_claim_deposit(amt(18), amt(10)).unwrap(), amt(38));
        assert_eq!(required_claim_deposit(amt(1799), amt(10)).unwrap(), amt(1819));
        assert_eq!(
            required_claim_deposit(amt(1), amt(u128::MAX)),
            Err(FeeError::Overflow)
        );
    }

    #[test]
    fn test_max_claim_amount() {
        assert_eq!(max_claim_amount(amt(1818), amt(10), amt(10)).unwrap(), amt(1798));
        assert_eq!(max_claim_amount(amt(5), amt(10), amt(0)), Err(FeeError::Overflow));
    }

    #[test]
    fn test_claim_amount_bounds() {
        let max = amt(1798);
        assert!(validate_claim_amount(amt(1), max).is_ok());
        assert!(validate_claim_amount(amt(1798), max).is_ok());
        assert_eq!(
            validate_claim_amount(amt(1799), max),
            Err(FeeError::InvalidClaim {
                amount: amt(1799),
                max
            })
        );
        assert!(validate_claim_amount(amt(0), max).is_err());
    }

    #[test]
    fn test_attached_must_match_exactly() {
        assert!(check_attached(amt(38), amt(38)).is_ok());
        assert_eq!(
            check_attached(amt(38), amt(28)),
            Err(FeeError::InsufficientDeposit {
                required: amt(38),
                attached: amt(28)
            })
        );
        assert_eq!(
            check_attached(amt(38), amt(39)),
            Err(FeeError::OverDeposit {
                required: amt(38),
                attached: amt(39)
            })
        );
    }
}
