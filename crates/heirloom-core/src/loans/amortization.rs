use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LedgerError;
use crate::time_value::{level_payment, monthly_rate};
use crate::types::*;
use crate::LedgerResult;

/// Tenures beyond this are accepted but flagged.
const LONG_TENURE_MONTHS: u32 = 480;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Terms of a fixed-payment loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    /// Annual rate as a percentage: 8.5 means 8.5% per year.
    pub annual_interest_rate_percent: Percent,
    pub tenure_months: u32,
}

/// One month of the repayment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub month: u32,
    pub payment: Money,
    pub principal_payment: Money,
    pub interest_payment: Money,
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_amount: Money,
    pub amortization_schedule: Vec<AmortizationEntry>,
}

impl AmortizationResult {
    /// Copy with every amount rounded to currency precision for display.
    pub fn rounded(&self) -> Self {
        AmortizationResult {
            monthly_payment: round_money(self.monthly_payment),
            total_interest: round_money(self.total_interest),
            total_amount: round_money(self.total_amount),
            amortization_schedule: self
                .amortization_schedule
                .iter()
                .map(|e| AmortizationEntry {
                    month: e.month,
                    payment: round_money(e.payment),
                    principal_payment: round_money(e.principal_payment),
                    interest_payment: round_money(e.interest_payment),
                    remaining_balance: round_money(e.remaining_balance),
                })
                .collect(),
        }
    }

    /// Sum of the principal portions across the schedule.
    pub fn total_principal_paid(&self) -> Money {
        self.amortization_schedule
            .iter()
            .map(|e| e.principal_payment)
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

fn validate(params: &LoanParameters) -> LedgerResult<()> {
    if params.principal <= Decimal::ZERO {
        return Err(LedgerError::invalid_loan(
            "principal",
            "Principal must be positive",
        ));
    }
    if params.tenure_months < 1 {
        return Err(LedgerError::invalid_loan(
            "tenure_months",
            "Tenure must be at least 1 month",
        ));
    }
    if params.annual_interest_rate_percent < Decimal::ZERO {
        return Err(LedgerError::invalid_loan(
            "annual_interest_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    Ok(())
}

/// Build the month-by-month repayment schedule of a fixed-payment loan.
///
/// Amounts keep full decimal precision; use [`AmortizationResult::rounded`]
/// for display. The final month pays off the exact remaining balance, so the
/// schedule always closes at zero and principal portions sum to the principal.
pub fn compute_amortization(params: &LoanParameters) -> LedgerResult<AmortizationResult> {
    validate(params)?;

    let rate = monthly_rate(params.annual_interest_rate_percent);
    let tenure = params.tenure_months;
    let monthly_payment = level_payment(params.principal, rate, tenure)?;

    let mut schedule = Vec::with_capacity(tenure as usize);
    let mut balance = params.principal;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=tenure {
        let interest_payment = balance
            .checked_mul(rate)
            .ok_or_else(|| LedgerError::overflow(format!("interest for month {month}")))?;
        let (payment, principal_payment) = if month == tenure {
            let closing = balance
                .checked_add(interest_payment)
                .ok_or_else(|| LedgerError::overflow("final payment"))?;
            (closing, balance)
        } else {
            // Never amortize past zero when the payment rounds high.
            let principal_part = (monthly_payment - interest_payment).min(balance);
            (monthly_payment, principal_part)
        };

        balance -= principal_payment;
        if month == tenure {
            balance = Decimal::ZERO;
        }
        total_interest = total_interest
            .checked_add(interest_payment)
            .ok_or_else(|| LedgerError::overflow("total interest"))?;

        schedule.push(AmortizationEntry {
            month,
            payment,
            principal_payment,
            interest_payment,
            remaining_balance: balance,
        });
    }

    tracing::debug!(
        principal = %params.principal,
        rate_percent = %params.annual_interest_rate_percent,
        tenure,
        monthly_payment = %monthly_payment,
        "computed amortization schedule"
    );

    Ok(AmortizationResult {
        monthly_payment,
        total_interest,
        total_amount: params
            .principal
            .checked_add(total_interest)
            .ok_or_else(|| LedgerError::overflow("total amount"))?,
        amortization_schedule: schedule,
    })
}

/// Compute an amortization schedule wrapped in the standard output envelope.
pub fn calculate_loan(
    params: &LoanParameters,
) -> LedgerResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = compute_amortization(params)?;

    if params.annual_interest_rate_percent.is_zero() {
        warnings.push("Zero interest rate: payments are principal only".into());
    }
    if params.tenure_months > LONG_TENURE_MONTHS {
        warnings.push(format!(
            "Tenure of {} months exceeds {} months",
            params.tenure_months, LONG_TENURE_MONTHS
        ));
    }
    if result.total_interest > params.principal {
        warnings.push(format!(
            "Total interest {} exceeds principal {}",
            round_money(result.total_interest),
            params.principal
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-payment amortization (monthly compounding)",
        &serde_json::json!({
            "principal": params.principal.to_string(),
            "annual_rate_percent": params.annual_interest_rate_percent.to_string(),
            "monthly_rate": monthly_rate(params.annual_interest_rate_percent).to_string(),
            "tenure_months": params.tenure_months,
        }),
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_loan() -> LoanParameters {
        LoanParameters {
            principal: dec!(50000),
            annual_interest_rate_percent: dec!(8.5),
            tenure_months: 60,
        }
    }

    #[test]
    fn test_standard_loan_payment() {
        let result = compute_amortization(&standard_loan()).unwrap();
        assert_eq!(round_money(result.monthly_payment), dec!(1025.83));
        assert_eq!(result.amortization_schedule.len(), 60);
    }

    #[test]
    fn test_schedule_closes_at_zero() {
        let result = compute_amortization(&standard_loan()).unwrap();
        let last = result.amortization_schedule.last().unwrap();
        assert_eq!(last.month, 60);
        assert_eq!(last.remaining_balance, Decimal::ZERO);
        assert!((result.total_principal_paid() - dec!(50000)).abs() < dec!(0.01));
    }

    #[test]
    fn test_first_month_split() {
        let result = compute_amortization(&standard_loan()).unwrap();
        let first = &result.amortization_schedule[0];
        // 50000 * 0.085 / 12 = 354.1666...
        assert_eq!(round_money(first.interest_payment), dec!(354.17));
        assert!(
            (first.principal_payment + first.interest_payment - result.monthly_payment).abs()
                < dec!(0.0000001)
        );
    }

    #[test]
    fn test_zero_interest() {
        let params = LoanParameters {
            principal: dec!(1200),
            annual_interest_rate_percent: Decimal::ZERO,
            tenure_months: 12,
        };
        let result = compute_amortization(&params).unwrap();
        assert_eq!(result.monthly_payment, dec!(100));
        assert_eq!(result.total_interest, Decimal::ZERO);
        assert_eq!(result.total_amount, dec!(1200));
        for e in &result.amortization_schedule {
            assert_eq!(e.interest_payment, Decimal::ZERO);
            assert_eq!(e.principal_payment, dec!(100));
        }
    }

    #[test]
    fn test_single_month() {
        let params = LoanParameters {
            principal: dec!(1000),
            annual_interest_rate_percent: dec!(12),
            tenure_months: 1,
        };
        let result = compute_amortization(&params).unwrap();
        assert_eq!(result.monthly_payment, dec!(1010));
        assert_eq!(result.total_interest, dec!(10));
        assert_eq!(result.amortization_schedule[0].remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_invalid_principal() {
        let mut params = standard_loan();
        params.principal = Decimal::ZERO;
        let err = compute_amortization(&params).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidLoanParameters { ref field, .. } if field == "principal"
        ));
    }

    #[test]
    fn test_invalid_tenure() {
        let mut params = standard_loan();
        params.tenure_months = 0;
        assert!(compute_amortization(&params).is_err());
    }

    #[test]
    fn test_negative_rate() {
        let mut params = standard_loan();
        params.annual_interest_rate_percent = dec!(-1);
        assert!(compute_amortization(&params).is_err());
    }

    #[test]
    fn test_total_amount_overflow_is_an_error() {
        // Payments sum to about 8.6e28, past Decimal::MAX.
        let params = LoanParameters {
            principal: "50000000000000000000000000000".parse().unwrap(),
            annual_interest_rate_percent: dec!(12),
            tenure_months: 120,
        };
        let err = compute_amortization(&params).unwrap_err();
        assert!(matches!(err, LedgerError::ArithmeticOverflow { .. }));
        assert!(calculate_loan(&params).is_err());
    }

    #[test]
    fn test_large_principal_within_range() {
        let params = LoanParameters {
            principal: "1000000000000000000000000000".parse().unwrap(),
            annual_interest_rate_percent: dec!(12),
            tenure_months: 120,
        };
        let result = compute_amortization(&params).unwrap();
        assert_eq!(
            result.amortization_schedule.last().unwrap().remaining_balance,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_rounded_copy() {
        let result = compute_amortization(&standard_loan()).unwrap().rounded();
        assert_eq!(result.monthly_payment, dec!(1025.83));
        assert_eq!(result.monthly_payment.scale(), 2);
        assert_eq!(
            result.amortization_schedule.last().unwrap().remaining_balance,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_calculate_loan_warnings() {
        let params = LoanParameters {
            principal: dec!(10000),
            annual_interest_rate_percent: Decimal::ZERO,
            tenure_months: 600,
        };
        let out = calculate_loan(&params).unwrap();
        assert_eq!(out.warnings.len(), 2);
        assert!(out.warnings[0].contains("Zero interest"));
    }
}
