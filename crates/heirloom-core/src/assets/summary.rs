use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Instant;

use super::groups::{
    aggregate_group_total, group_by_category, signed_total, AssetGroupTable, GroupKey,
};
use super::record::{AssetKind, AssetRecord};
use super::valuation::{compute_gain_loss, gain_between, value_of};
use crate::types::*;
use crate::LedgerResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioInput {
    pub assets: Vec<AssetRecord>,
}

/// Valuation of a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetValuation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub label: String,
    /// `None` for records of an unrecognized type.
    pub asset_type: Option<AssetKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub group: Option<GroupKey>,
    pub purchase_value: Money,
    pub current_value: Money,
    pub gain: Money,
    pub gain_percent: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    pub liability: bool,
    pub asset_count: usize,
    /// Positive magnitude of current value.
    pub total: Money,
    /// Total with the display sign (liabilities negative).
    pub signed_total: Money,
    pub purchase_total: Money,
    pub gain: Money,
    pub gain_percent: Percent,
    /// Share of total assets, or of total liabilities for liability groups.
    pub share_percent: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub groups: Vec<GroupSummary>,
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub net_worth: Money,
    /// Purchase value of the non-liability groups.
    pub purchase_value: Money,
    pub gain: Money,
    pub gain_percent: Percent,
    pub excluded_count: usize,
    pub currencies: Vec<String>,
    pub assets: Vec<AssetValuation>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn percent_of(part: Money, whole: Money) -> Percent {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .map(|pct| pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO)
}

fn valuation_for(table: &AssetGroupTable, asset: &AssetRecord) -> AssetValuation {
    let gl = compute_gain_loss(asset);
    AssetValuation {
        id: asset.id().map(str::to_string),
        label: asset.label(),
        asset_type: asset.kind(),
        currency: asset.purchase_currency().map(str::to_string),
        group: asset.kind().and_then(|k| table.group_of(k)).map(|g| g.key),
        purchase_value: value_of(asset, false),
        current_value: value_of(asset, true),
        gain: gl.gain,
        gain_percent: gl.gain_percent,
    }
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Per-record purchase value, current value and gain, in input order.
pub fn value_assets(table: &AssetGroupTable, assets: &[AssetRecord]) -> Vec<AssetValuation> {
    assets.iter().map(|a| valuation_for(table, a)).collect()
}

/// Group totals, shares, net worth and gain/loss over a list of records.
pub fn summarize_portfolio(
    table: &AssetGroupTable,
    input: &PortfolioInput,
) -> LedgerResult<ComputationOutput<PortfolioSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let grouped = group_by_category(table, &input.assets);

    let mut groups = Vec::with_capacity(table.groups().len());
    for group in table.groups() {
        let members = grouped.get(&group.key).map(Vec::as_slice).unwrap_or(&[]);
        let total = aggregate_group_total(members);
        let purchase_total = sum_money(members.iter().map(|a| value_of(a, false)));
        let gain = sum_money(members.iter().map(|a| compute_gain_loss(a).gain));
        groups.push(GroupSummary {
            key: group.key,
            liability: group.liability,
            asset_count: members.len(),
            total,
            signed_total: signed_total(group, total),
            purchase_total,
            gain,
            gain_percent: gain_between(purchase_total, purchase_total.saturating_add(gain))
                .gain_percent,
            share_percent: Decimal::ZERO,
        });
    }

    let total_assets = sum_money(groups.iter().filter(|g| !g.liability).map(|g| g.total));
    let total_liabilities = sum_money(groups.iter().filter(|g| g.liability).map(|g| g.total));
    for g in &mut groups {
        let whole = if g.liability { total_liabilities } else { total_assets };
        g.share_percent = percent_of(g.total, whole);
    }

    let purchase_value = sum_money(
        groups
            .iter()
            .filter(|g| !g.liability)
            .map(|g| g.purchase_total),
    );
    let gain = sum_money(groups.iter().filter(|g| !g.liability).map(|g| g.gain));

    let placed: usize = grouped.values().map(Vec::len).sum();
    let excluded_count = input.assets.len() - placed;
    if excluded_count > 0 {
        warnings.push(format!(
            "{excluded_count} record(s) match no asset group and are excluded from totals"
        ));
    }

    let currencies: BTreeSet<String> = input
        .assets
        .iter()
        .filter_map(|a| a.purchase_currency())
        .map(str::to_string)
        .collect();
    if currencies.len() > 1 {
        warnings.push(format!(
            "Records use {} currencies ({}); values are summed without conversion",
            currencies.len(),
            currencies.iter().cloned().collect::<Vec<_>>().join(", ")
        ));
    }

    tracing::debug!(
        records = input.assets.len(),
        excluded = excluded_count,
        total_assets = %total_assets,
        total_liabilities = %total_liabilities,
        "summarized portfolio"
    );

    let summary = PortfolioSummary {
        groups,
        total_assets,
        total_liabilities,
        net_worth: total_assets.saturating_sub(total_liabilities),
        purchase_value,
        gain,
        gain_percent: gain_between(purchase_value, purchase_value.saturating_add(gain))
            .gain_percent,
        excluded_count,
        currencies: currencies.into_iter().collect(),
        assets: value_assets(table, &input.assets),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Portfolio aggregation by asset group (current value, purchase-basis fallback)",
        &serde_json::json!({
            "records": input.assets.len(),
            "groups": table.groups().iter().map(|g| g.key.as_str()).collect::<Vec<_>>(),
        }),
        warnings,
        elapsed,
        summary,
    ))
}
