//! Property tests for the amortization engine invariants.

use heirloom_core::loans::amortization::{compute_amortization, LoanParameters};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Generators
// =============================================================================

/// Principal between 1.00 and 10,000,000.00 in cents.
fn arb_principal() -> impl Strategy<Value = Decimal> {
    (100i64..1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Annual rate between 0.00% and 36.00%, with zero drawn often.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        4 => (0i64..=3600).prop_map(|bp| Decimal::new(bp, 2)),
    ]
}

fn arb_loan() -> impl Strategy<Value = LoanParameters> {
    (arb_principal(), arb_rate(), 1u32..=360).prop_map(|(principal, rate, tenure)| {
        LoanParameters {
            principal,
            annual_interest_rate_percent: rate,
            tenure_months: tenure,
        }
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_principal_fully_repaid(params in arb_loan()) {
        let result = compute_amortization(&params).unwrap();
        prop_assert_eq!(result.amortization_schedule.len(), params.tenure_months as usize);
        prop_assert!((result.total_principal_paid() - params.principal).abs() <= dec!(0.01));
        prop_assert_eq!(
            result.amortization_schedule.last().unwrap().remaining_balance,
            Decimal::ZERO
        );
    }

    #[test]
    fn prop_balance_never_increases(params in arb_loan()) {
        let result = compute_amortization(&params).unwrap();
        let mut previous = params.principal;
        for entry in &result.amortization_schedule {
            prop_assert!(entry.remaining_balance <= previous);
            prop_assert!(entry.remaining_balance >= Decimal::ZERO);
            previous = entry.remaining_balance;
        }
    }

    #[test]
    fn prop_totals_consistent(params in arb_loan()) {
        let result = compute_amortization(&params).unwrap();
        prop_assert_eq!(result.total_amount, params.principal + result.total_interest);
        let interest: Decimal = result
            .amortization_schedule
            .iter()
            .map(|e| e.interest_payment)
            .sum();
        prop_assert_eq!(result.total_interest, interest);
    }

    #[test]
    fn prop_zero_rate_is_principal_only(principal in arb_principal(), tenure in 1u32..=360) {
        let params = LoanParameters {
            principal,
            annual_interest_rate_percent: Decimal::ZERO,
            tenure_months: tenure,
        };
        let result = compute_amortization(&params).unwrap();
        let share = principal / Decimal::from(tenure);
        prop_assert_eq!(result.monthly_payment, share);
        for entry in &result.amortization_schedule {
            prop_assert_eq!(entry.interest_payment, Decimal::ZERO);
            prop_assert!((entry.principal_payment - share).abs() <= dec!(0.01));
        }
    }
}
