use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::LedgerError;
use crate::types::{Money, Percent, Rate};
use crate::LedgerResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Convert an annual percentage (8.5 = 8.5%/yr) to a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / HUNDRED / MONTHS_PER_YEAR
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub fn compound_factor(rate: Rate, periods: u32) -> LedgerResult<Decimal> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..periods {
        result = result
            .checked_mul(factor)
            .ok_or_else(|| LedgerError::ArithmeticOverflow {
                context: format!("compound factor (1 + {rate})^{periods}"),
            })?;
    }
    Ok(result)
}

/// Level payment that retires `principal` over `periods` at `rate` per period:
/// `P * r * (1+r)^n / ((1+r)^n - 1)`, or `P / n` when the rate is zero.
pub fn level_payment(principal: Money, rate: Rate, periods: u32) -> LedgerResult<Money> {
    if periods == 0 {
        return Err(LedgerError::invalid_loan(
            "tenure_months",
            "Number of periods must be > 0",
        ));
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let factor = compound_factor(rate, periods)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(LedgerError::ArithmeticOverflow {
            context: "level payment annuity factor underflowed to zero".into(),
        });
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| LedgerError::ArithmeticOverflow {
            context: "level payment".into(),
        })
}
