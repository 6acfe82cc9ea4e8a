use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::record::{AssetRecord, Shape};
use crate::types::{Money, Percent};

/// Gain or loss of a record's current value over its purchase value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainLoss {
    pub gain: Money,
    /// Percentage of purchase value, rounded to 2 dp.
    pub gain_percent: Percent,
}

/// `None` when either factor is missing or the product overflows, so the
/// chain moves on to the next field.
fn product(a: Option<Money>, b: Option<Money>) -> Option<Money> {
    a?.checked_mul(b?)
}

/// Current-value fields, in precedence order. `None` when none apply.
fn current_value(shape: Shape<'_>) -> Option<Money> {
    match shape {
        Shape::Units(h) => h
            .current_total_value
            .or(h.current_value)
            .or_else(|| product(h.quantity, h.current_unit_price)),
        Shape::Lump(l) => l.current_total_value.or(l.current_value),
        Shape::Area(a) => a
            .current_total_value
            .or(a.current_value)
            .or_else(|| product(a.area, a.current_price_per_area)),
        Shape::Weight(w) => w
            .current_total_value
            .or(w.current_value)
            .or_else(|| product(w.weight, w.current_unit_price)),
        Shape::Debt(d) => d.current_total_value.or(d.current_value),
        Shape::None => None,
    }
}

/// Purchase-basis fields, in precedence order. `None` when none apply.
fn basis_value(shape: Shape<'_>) -> Option<Money> {
    match shape {
        Shape::Units(h) => h.total_value.or_else(|| product(h.quantity, h.unit_price)),
        Shape::Lump(l) => l.total_value,
        Shape::Area(a) => a.total_value.or_else(|| product(a.area, a.price_per_area)),
        Shape::Weight(w) => w.total_value.or_else(|| product(w.weight, w.unit_price)),
        Shape::Debt(d) => d.total_value.or(d.principal_amount),
        Shape::None => None,
    }
}

/// Resolve a record's monetary value.
///
/// With `use_current`, the current-value fields are tried first:
/// `current_total_value`, `current_value`, `quantity * current_unit_price`,
/// `area * current_price_per_area`, `weight * current_unit_price`. The
/// purchase basis follows: `total_value`, `quantity * unit_price`,
/// `area * price_per_area`, `weight * unit_price`, `principal_amount`.
/// The first present field wins; a record with none of them is worth 0.
pub fn value_of(asset: &AssetRecord, use_current: bool) -> Money {
    let shape = asset.shape();
    let current = if use_current {
        current_value(shape)
    } else {
        None
    };
    current
        .or_else(|| basis_value(shape))
        .unwrap_or(Decimal::ZERO)
}

/// Gain of current over purchase value. A record whose current value
/// resolves to 0 is measured at its purchase value, so it shows no change
/// instead of a total loss.
pub fn compute_gain_loss(asset: &AssetRecord) -> GainLoss {
    let purchase = value_of(asset, false);
    let current = match value_of(asset, true) {
        v if v.is_zero() => purchase,
        v => v,
    };
    gain_between(purchase, current)
}

/// Gain and percentage change from `purchase` to `current`.
///
/// The gain saturates at the decimal range. The percentage is 0 when the
/// purchase value is 0 or the ratio does not fit in a `Decimal`.
pub fn gain_between(purchase: Money, current: Money) -> GainLoss {
    let gain = current.saturating_sub(purchase);
    let gain_percent = gain
        .checked_div(purchase)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .map(|pct| pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO);
    GainLoss { gain, gain_percent }
}
