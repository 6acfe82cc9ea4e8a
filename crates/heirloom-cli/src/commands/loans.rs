use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use heirloom_core::loans::amortization::{self, LoanParameters};
use heirloom_core::loans::comparison::{self, LoanComparisonInput};
use heirloom_core::loans::liability::{self, LiabilityScheduleInput};

use super::Settings;
use crate::input;

/// Arguments for an amortization schedule
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (8.5 = 8.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub tenure: Option<u32>,
}

pub fn run_loan(args: LoanArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let params: LoanParameters = match input::read_typed(args.input.as_deref())? {
        Some(params) => params,
        None => LoanParameters {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_interest_rate_percent: args
                .rate
                .ok_or("--rate is required (or provide --input)")?,
            tenure_months: args
                .tenure
                .ok_or("--tenure is required (or provide --input)")?,
        },
    };

    let output = amortization::calculate_loan(&params)?;
    let output = if settings.full_precision {
        output
    } else {
        output.map(|r| r.rounded())
    };
    Ok(serde_json::to_value(output)?)
}

/// Arguments for a what-if comparison of loan terms
#[derive(Args)]
pub struct CompareLoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Original annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Original tenure in months
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Adjusted annual interest rate in percent (defaults to --rate)
    #[arg(long)]
    pub new_rate: Option<Decimal>,

    /// Adjusted tenure in months (defaults to --tenure)
    #[arg(long)]
    pub new_tenure: Option<u32>,
}

pub fn run_compare_loan(
    args: CompareLoanArgs,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input: LoanComparisonInput = match input::read_typed(args.input.as_deref())? {
        Some(cmp_input) => cmp_input,
        None => {
            let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
            let tenure = args.tenure.ok_or("--tenure is required (or provide --input)")?;
            LoanComparisonInput {
                principal: args
                    .principal
                    .ok_or("--principal is required (or provide --input)")?,
                original_rate_percent: rate,
                original_tenure_months: tenure,
                adjusted_rate_percent: args.new_rate.unwrap_or(rate),
                adjusted_tenure_months: args.new_tenure.unwrap_or(tenure),
            }
        }
    };

    let output = comparison::compare_loan_terms(&cmp_input)?;
    let output = if settings.full_precision {
        output
    } else {
        output.map(|c| c.rounded())
    };
    Ok(serde_json::to_value(output)?)
}

/// Arguments for amortizing a liability record
#[derive(Args)]
pub struct LiabilityScheduleArgs {
    /// Path to JSON input file with `asset`, `annual_interest_rate_percent`
    /// and `tenure_months`
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON file holding a single loan or credit card record
    #[arg(long, conflicts_with = "input")]
    pub asset: Option<String>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub tenure: Option<u32>,
}

pub fn run_liability_schedule(
    args: LiabilityScheduleArgs,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: LiabilityScheduleInput = if let Some(ref path) = args.asset {
        LiabilityScheduleInput {
            asset: input::file::read_json(path)?,
            annual_interest_rate_percent: args.rate.ok_or("--rate is required with --asset")?,
            tenure_months: args.tenure.ok_or("--tenure is required with --asset")?,
        }
    } else if let Some(schedule_input) = input::read_typed(args.input.as_deref())? {
        schedule_input
    } else {
        return Err("--input <file.json>, --asset <file.json> or stdin required".into());
    };

    let output = liability::calculate_liability_schedule(&schedule_input)?;
    let output = if settings.full_precision {
        output
    } else {
        output.map(|r| r.rounded())
    };
    Ok(serde_json::to_value(output)?)
}
