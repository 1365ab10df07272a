mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::comparison::CompareLendersArgs;
use commands::eligibility::EligibilityArgs;
use commands::emi::{AffordabilityArgs, EmiArgs, StressArgs};
use commands::prepayment::PrepaymentArgs;
use commands::products::ProductsArgs;

/// Loan EMI, prepayment and eligibility calculations
#[derive(Parser)]
#[command(
    name = "sarvasva",
    version,
    about = "Loan EMI, prepayment and eligibility calculations",
    long_about = "A CLI for retail loan calculations with decimal precision. \
                  Supports EMI and amortization, faster closure with extra payments, \
                  part-payment charges, FOIR eligibility, rate-shock stress tests \
                  and lender comparison."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the EMI and repayment totals
    Emi(EmiArgs),
    /// Simulate faster closure with an extra monthly payment
    AcceleratedPayoff(EmiArgs),
    /// Calculate part-payment charges
    PrepaymentCharges(PrepaymentArgs),
    /// Estimate loan eligibility from income (FOIR)
    Eligibility(EligibilityArgs),
    /// EMI under interest-rate shocks
    StressTest(StressArgs),
    /// Label an EMI as safe, aggressive or risky against surplus income
    Affordability(AffordabilityArgs),
    /// Compare lender offers by total cost
    CompareLenders(CompareLendersArgs),
    /// List the loan product catalogue
    Products(ProductsArgs),
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

fn main() {
    // stdout carries results; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::emi::run_emi(args),
        Commands::AcceleratedPayoff(args) => commands::emi::run_accelerated_payoff(args),
        Commands::PrepaymentCharges(args) => commands::prepayment::run_prepayment_charges(args),
        Commands::Eligibility(args) => commands::eligibility::run_eligibility(args),
        Commands::StressTest(args) => commands::emi::run_stress_test(args),
        Commands::Affordability(args) => commands::emi::run_affordability(args),
        Commands::CompareLenders(args) => commands::comparison::run_compare_lenders(args),
        Commands::Products(args) => commands::products::run_products(args),
        Commands::Version => {
            println!("sarvasva {}", env!("CARGO_PKG_VERSION"));
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
