mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::assets::{AssetListArgs, PortfolioArgs};
use commands::loans::{CompareLoanArgs, LiabilityScheduleArgs, LoanArgs};

/// Loan amortization and asset valuation for the heirloom ledger
#[derive(Parser)]
#[command(
    name = "heirloom",
    version,
    about = "Loan amortization and asset valuation with decimal precision",
    long_about = "A CLI over the heirloom ledger core. Builds loan amortization \
                  schedules, compares loan terms, and values, groups and \
                  summarizes asset and liability records."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Asset group table (YAML or JSON); defaults to the built-in table
    #[arg(long, global = true)]
    groups: Option<String>,

    /// Keep full decimal precision instead of rounding amounts to cents
    #[arg(long, global = true)]
    full_precision: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a fixed-payment amortization schedule
    Loan(LoanArgs),
    /// Compare original loan terms against adjusted rate and tenure
    CompareLoan(CompareLoanArgs),
    /// Amortize a loan or credit card record from its principal amount
    LiabilitySchedule(LiabilityScheduleArgs),
    /// Purchase value, current value and gain for each record
    ValueAssets(AssetListArgs),
    /// Partition records into asset groups with group totals
    GroupAssets(AssetListArgs),
    /// Group totals, shares, net worth and gain/loss
    Portfolio(PortfolioArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let default_directives = if verbose {
        "heirloom=debug,heirloom_core=debug"
    } else {
        "heirloom=warn,heirloom_core=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    // stdout carries the command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = commands::Settings {
        groups_path: cli.groups.clone(),
        full_precision: cli.full_precision,
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Loan(args) => commands::loans::run_loan(args, &settings),
        Commands::CompareLoan(args) => commands::loans::run_compare_loan(args, &settings),
        Commands::LiabilitySchedule(args) => {
            commands::loans::run_liability_schedule(args, &settings)
        }
        Commands::ValueAssets(args) => commands::assets::run_value_assets(args, &settings),
        Commands::GroupAssets(args) => commands::assets::run_group_assets(args, &settings),
        Commands::Portfolio(args) => commands::assets::run_portfolio(args, &settings),
        Commands::Version => {
            println!("heirloom {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
