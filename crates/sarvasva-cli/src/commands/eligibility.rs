use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use sarvasva_core::eligibility::foir::{self, EligibilityInput, EmployerCategory};

use super::TenureArgs;
use crate::input;

/// Arguments for loan eligibility
#[derive(Args)]
pub struct EligibilityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross monthly income
    #[arg(long, alias = "income")]
    pub monthly_income: Option<Decimal>,

    /// Monthly household expenses
    #[arg(long, alias = "expenses")]
    pub monthly_expenses: Option<Decimal>,

    /// EMIs already being paid
    #[arg(long, alias = "existing-emi")]
    pub existing_monthly_obligations: Option<Decimal>,

    #[command(flatten)]
    pub tenure: TenureArgs,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Employer type, e.g. "Government / PSU", mnc, self-employed
    #[arg(long, alias = "employer", default_value = "other")]
    pub employer_category: EmployerCategory,
}

pub fn run_eligibility(args: EligibilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let elig_input = match input::read_structured::<EligibilityInput>(args.input.as_deref())? {
        Some(data) => data,
        None => EligibilityInput {
            monthly_income: args
                .monthly_income
                .ok_or("--monthly-income is required (or provide --input)")?,
            monthly_expenses: args.monthly_expenses.unwrap_or(Decimal::ZERO),
            existing_monthly_obligations: args
                .existing_monthly_obligations
                .unwrap_or(Decimal::ZERO),
            tenure_months: args.tenure.require()?,
            annual_rate_percent: args
                .annual_rate_percent
                .ok_or("--annual-rate-percent is required (or provide --input)")?,
            employer_category: args.employer_category,
        },
    };

    let result = foir::estimate_eligibility(&elig_input)?;
    Ok(serde_json::to_value(result)?)
}
