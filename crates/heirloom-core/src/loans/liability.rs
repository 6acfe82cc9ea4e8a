use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::amortization::{compute_amortization, AmortizationResult, LoanParameters};
use crate::assets::record::AssetRecord;
use crate::assets::valuation::value_of;
use crate::error::LedgerError;
use crate::types::*;
use crate::LedgerResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiabilityScheduleInput {
    pub asset: AssetRecord,
    pub annual_interest_rate_percent: Percent,
    pub tenure_months: u32,
}

/// Schedule for a loan or card record, using its purchase-basis value
/// (normally `principal_amount`) as the principal.
pub fn amortize_liability(
    asset: &AssetRecord,
    annual_interest_rate_percent: Percent,
    tenure_months: u32,
) -> LedgerResult<AmortizationResult> {
    if !asset.is_liability() {
        return Err(LedgerError::NotALiability(asset.label()));
    }

    let principal = value_of(asset, false);
    if principal <= Decimal::ZERO {
        return Err(LedgerError::InvalidLoanParameters {
            field: "principal".into(),
            reason: format!("'{}' has no positive principal amount", asset.label()),
        });
    }

    compute_amortization(&LoanParameters {
        principal,
        annual_interest_rate_percent,
        tenure_months,
    })
}

pub fn calculate_liability_schedule(
    input: &LiabilityScheduleInput,
) -> LedgerResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = amortize_liability(
        &input.asset,
        input.annual_interest_rate_percent,
        input.tenure_months,
    )?;

    let outstanding = value_of(&input.asset, true);
    let principal = value_of(&input.asset, false);
    if outstanding != principal {
        warnings.push(format!(
            "Schedule uses the original principal {principal}; the record's current balance is {outstanding}"
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-payment amortization of a liability record",
        &serde_json::json!({
            "asset": input.asset.label(),
            "principal": principal.to_string(),
            "annual_rate_percent": input.annual_interest_rate_percent.to_string(),
            "tenure_months": input.tenure_months,
        }),
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::record::{Debt, LumpSum};
    use rust_decimal_macros::dec;

    fn home_loan() -> AssetRecord {
        AssetRecord::Loan(Debt {
            name: Some("Home loan".into()),
            principal_amount: Some(dec!(50000)),
            ..Default::default()
        })
    }

    #[test]
    fn test_liability_principal_feeds_schedule() {
        let result = amortize_liability(&home_loan(), dec!(8.5), 60).unwrap();
        assert_eq!(round_money(result.monthly_payment), dec!(1025.83));
        assert!((result.total_principal_paid() - dec!(50000)).abs() < dec!(0.01));
    }

    #[test]
    fn test_non_liability_rejected() {
        let bank = AssetRecord::Bank(LumpSum {
            total_value: Some(dec!(100)),
            ..Default::default()
        });
        let err = amortize_liability(&bank, dec!(5), 12).unwrap_err();
        assert!(matches!(err, LedgerError::NotALiability(_)));
    }

    #[test]
    fn test_liability_without_principal_rejected() {
        let empty = AssetRecord::CreditCard(Debt::default());
        let err = amortize_liability(&empty, dec!(36), 12).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidLoanParameters { .. }));
    }

    #[test]
    fn test_outstanding_balance_warning() {
        let input = LiabilityScheduleInput {
            asset: AssetRecord::Loan(Debt {
                principal_amount: Some(dec!(10000)),
                current_value: Some(dec!(6000)),
                ..Default::default()
            }),
            annual_interest_rate_percent: dec!(10),
            tenure_months: 24,
        };
        let out = calculate_liability_schedule(&input).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.result.amortization_schedule.len(), 24);
    }
}
