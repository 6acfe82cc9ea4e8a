use heirloom_core::assets::groups::{
    aggregate_group_total, group_by_category, signed_total, AssetGroupTable,
};
use heirloom_core::assets::record::AssetRecord;
use heirloom_core::assets::summary::{self, PortfolioInput};
use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Asset input from the UI: the record list plus an optional group table
/// in the same layout as the YAML/JSON configuration file.
#[derive(Deserialize)]
struct AssetsRequest {
    assets: Vec<AssetRecord>,
    #[serde(default)]
    groups: Option<serde_json::Value>,
}

impl AssetsRequest {
    fn parse(input_json: &str) -> NapiResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input_json).map_err(to_napi_error)?;
        if value.is_array() {
            let assets = serde_json::from_value(value).map_err(to_napi_error)?;
            return Ok(AssetsRequest {
                assets,
                groups: None,
            });
        }
        serde_json::from_value(value).map_err(to_napi_error)
    }

    fn table(&self) -> NapiResult<AssetGroupTable> {
        match &self.groups {
            Some(groups) => {
                AssetGroupTable::from_json_str(&groups.to_string()).map_err(to_napi_error)
            }
            None => Ok(AssetGroupTable::default()),
        }
    }
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let input: heirloom_core::loans::amortization::LoanParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = heirloom_core::loans::amortization::calculate_loan(&input)
        .map_err(to_napi_error)?
        .map(|r| r.rounded());
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_loan_terms(input_json: String) -> NapiResult<String> {
    let input: heirloom_core::loans::comparison::LoanComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = heirloom_core::loans::comparison::compare_loan_terms(&input)
        .map_err(to_napi_error)?
        .map(|c| c.rounded());
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn liability_schedule(input_json: String) -> NapiResult<String> {
    let input: heirloom_core::loans::liability::LiabilityScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = heirloom_core::loans::liability::calculate_liability_schedule(&input)
        .map_err(to_napi_error)?
        .map(|r| r.rounded());
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

#[napi]
pub fn value_assets(input_json: String) -> NapiResult<String> {
    let request = AssetsRequest::parse(&input_json)?;
    let rows = summary::value_assets(&request.table()?, &request.assets);
    serde_json::to_string(&rows).map_err(to_napi_error)
}

#[napi]
pub fn group_assets(input_json: String) -> NapiResult<String> {
    let request = AssetsRequest::parse(&input_json)?;
    let table = request.table()?;
    let grouped = group_by_category(&table, &request.assets);

    let mut groups = serde_json::Map::new();
    for group in table.groups() {
        let members = grouped.get(&group.key).map(Vec::as_slice).unwrap_or(&[]);
        let total = aggregate_group_total(members);
        groups.insert(
            group.key.to_string(),
            serde_json::json!({
                "liability": group.liability,
                "total": total,
                "signed_total": signed_total(group, total),
                "assets": members,
            }),
        );
    }
    serde_json::to_string(&groups).map_err(to_napi_error)
}

#[napi]
pub fn portfolio_summary(input_json: String) -> NapiResult<String> {
    let request = AssetsRequest::parse(&input_json)?;
    let table = request.table()?;
    let input = PortfolioInput {
        assets: request.assets,
    };
    let output = summary::summarize_portfolio(&table, &input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
