use clap::Args;
use serde_json::{json, Map, Value};

use heirloom_core::assets::groups::{aggregate_group_total, group_by_category, signed_total};
use heirloom_core::assets::record::AssetRecord;
use heirloom_core::assets::summary::{self, PortfolioInput};

use super::Settings;
use crate::{config, input};

/// Arguments for commands over a list of asset records
#[derive(Args)]
pub struct AssetListArgs {
    /// Path to JSON input: an array of records or `{"assets": [...]}`
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the portfolio summary
#[derive(Args)]
pub struct PortfolioArgs {
    /// Path to JSON input: an array of records or `{"assets": [...]}`
    #[arg(long)]
    pub input: Option<String>,

    /// Leave the per-record valuations out of the output
    #[arg(long)]
    pub totals_only: bool,
}

/// Accept both the bare `GET /api/assets` array and a wrapped object.
fn read_assets(path: Option<&str>) -> Result<Vec<AssetRecord>, Box<dyn std::error::Error>> {
    let document = input::read_document(path)?
        .ok_or("--input <file.json> or stdin required for asset records")?;
    let assets: Vec<AssetRecord> = match document {
        Value::Array(_) => serde_json::from_value(document)?,
        Value::Object(_) => serde_json::from_value::<PortfolioInput>(document)?.assets,
        _ => return Err("asset input must be an array or an object with \"assets\"".into()),
    };
    tracing::debug!(records = assets.len(), "loaded asset records");
    Ok(assets)
}

pub fn run_value_assets(
    args: AssetListArgs,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let table = config::load_group_table(settings.groups_path.as_deref())?;
    let assets = read_assets(args.input.as_deref())?;
    let rows = summary::value_assets(&table, &assets);
    Ok(json!({ "results": rows }))
}

pub fn run_group_assets(
    args: AssetListArgs,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let table = config::load_group_table(settings.groups_path.as_deref())?;
    let assets = read_assets(args.input.as_deref())?;
    let grouped = group_by_category(&table, &assets);

    let mut groups = Map::new();
    let mut placed = 0usize;
    for group in table.groups() {
        let members = grouped.get(&group.key).map(Vec::as_slice).unwrap_or(&[]);
        placed += members.len();
        let total = aggregate_group_total(members);
        groups.insert(
            group.key.to_string(),
            json!({
                "liability": group.liability,
                "asset_count": members.len(),
                "total": total,
                "signed_total": signed_total(group, total),
                "assets": members,
            }),
        );
    }

    Ok(json!({
        "result": {
            "groups": groups,
            "excluded_count": assets.len() - placed,
        }
    }))
}

pub fn run_portfolio(
    args: PortfolioArgs,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let table = config::load_group_table(settings.groups_path.as_deref())?;
    let portfolio = PortfolioInput {
        assets: read_assets(args.input.as_deref())?,
    };
    let mut output = summary::summarize_portfolio(&table, &portfolio)?;
    if args.totals_only {
        output.result.assets.clear();
    }
    Ok(serde_json::to_value(output)?)
}
