use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::amortization::{compute_amortization, AmortizationResult, LoanParameters};
use crate::types::*;
use crate::LedgerResult;

/// Original terms against adjusted terms for the same principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonInput {
    pub principal: Money,
    pub original_rate_percent: Percent,
    pub original_tenure_months: u32,
    pub adjusted_rate_percent: Percent,
    pub adjusted_tenure_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparison {
    pub original: AmortizationResult,
    pub adjusted: AmortizationResult,
    /// Original total interest minus adjusted total interest.
    pub interest_savings: Money,
    /// Adjusted monthly payment minus original monthly payment.
    pub monthly_payment_change: Money,
    pub tenure_change_months: i64,
    pub has_savings: bool,
}

impl LoanComparison {
    /// Copy with every amount rounded to cents for display.
    pub fn rounded(&self) -> Self {
        LoanComparison {
            original: self.original.rounded(),
            adjusted: self.adjusted.rounded(),
            interest_savings: round_money(self.interest_savings),
            monthly_payment_change: round_money(self.monthly_payment_change),
            tenure_change_months: self.tenure_change_months,
            has_savings: self.has_savings,
        }
    }
}

impl LoanComparisonInput {
    pub fn original_terms(&self) -> LoanParameters {
        LoanParameters {
            principal: self.principal,
            annual_interest_rate_percent: self.original_rate_percent,
            tenure_months: self.original_tenure_months,
        }
    }

    pub fn adjusted_terms(&self) -> LoanParameters {
        LoanParameters {
            principal: self.principal,
            annual_interest_rate_percent: self.adjusted_rate_percent,
            tenure_months: self.adjusted_tenure_months,
        }
    }
}

/// Recompute a loan under adjusted rate and tenure and report what changes.
///
/// Both schedules are computed independently from the same principal, so the
/// call can be repeated for every slider position without carrying state.
pub fn compare_loan_terms(
    input: &LoanComparisonInput,
) -> LedgerResult<ComputationOutput<LoanComparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let original = compute_amortization(&input.original_terms())?;
    let adjusted = compute_amortization(&input.adjusted_terms())?;

    let interest_savings = original.total_interest - adjusted.total_interest;
    let monthly_payment_change = adjusted.monthly_payment - original.monthly_payment;

    if monthly_payment_change > Decimal::ZERO {
        warnings.push(format!(
            "Adjusted terms raise the monthly payment by {}",
            round_money(monthly_payment_change)
        ));
    }

    let comparison = LoanComparison {
        interest_savings,
        monthly_payment_change,
        tenure_change_months: i64::from(input.adjusted_tenure_months)
            - i64::from(input.original_tenure_months),
        has_savings: interest_savings > Decimal::ZERO,
        original,
        adjusted,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan what-if comparison (fixed-payment amortization)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "original": {
                "rate_percent": input.original_rate_percent.to_string(),
                "tenure_months": input.original_tenure_months,
            },
            "adjusted": {
                "rate_percent": input.adjusted_rate_percent.to_string(),
                "tenure_months": input.adjusted_tenure_months,
            },
        }),
        warnings,
        elapsed,
        comparison,
    ))
}
