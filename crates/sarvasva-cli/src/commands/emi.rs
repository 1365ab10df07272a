use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use sarvasva_core::emi::accelerated;
use sarvasva_core::emi::amortization;
use sarvasva_core::emi::stress::{self, AffordabilityInput, StressTestInput};
use sarvasva_core::emi::LoanParameters;
use sarvasva_core::products::LoanType;

use super::TenureArgs;
use crate::input;

/// Arguments shared by the EMI and accelerated-payoff commands
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 10.99)
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    #[command(flatten)]
    pub tenure: TenureArgs,

    /// Extra amount paid every month on top of the EMI
    #[arg(long, alias = "extra")]
    pub extra_monthly_payment: Option<Decimal>,

    /// Check the scenario against a loan product (personal, home, business, car, two-wheeler)
    #[arg(long)]
    pub loan_type: Option<LoanType>,

    /// Include the month-by-month schedule
    #[arg(long)]
    pub schedule: bool,
}

/// Arguments for the rate-shock stress test
#[derive(Args)]
pub struct StressArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    #[command(flatten)]
    pub tenure: TenureArgs,

    /// Rate shocks in percentage points, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = vec![Decimal::ZERO, Decimal::ONE, Decimal::TWO])]
    pub shocks: Vec<Decimal>,
}

/// Arguments for the EMI affordability label
#[derive(Args)]
pub struct AffordabilityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly installment to assess
    #[arg(long, alias = "emi")]
    pub installment: Option<Decimal>,

    /// Gross monthly income
    #[arg(long, alias = "income")]
    pub monthly_income: Option<Decimal>,

    /// Monthly household expenses
    #[arg(long, alias = "expenses")]
    pub monthly_expenses: Option<Decimal>,

    /// EMIs already being paid
    #[arg(long, alias = "existing-emi")]
    pub existing_monthly_obligations: Option<Decimal>,
}

fn loan_parameters(args: &EmiArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    if let Some(params) = input::read_structured::<LoanParameters>(args.input.as_deref())? {
        return Ok(params);
    }
    Ok(LoanParameters {
        principal: args
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        annual_rate_percent: args
            .annual_rate_percent
            .ok_or("--annual-rate-percent is required (or provide --input)")?,
        tenure_months: args.tenure.require()?,
        extra_monthly_payment: args.extra_monthly_payment.unwrap_or(Decimal::ZERO),
        loan_type: args.loan_type,
        include_schedule: args.schedule,
    })
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = loan_parameters(&args)?;
    let result = amortization::calculate_emi(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_accelerated_payoff(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = loan_parameters(&args)?;
    let result = accelerated::simulate_accelerated_payoff(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_stress_test(args: StressArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let stress_input = match input::read_structured::<StressTestInput>(args.input.as_deref())? {
        Some(data) => data,
        None => StressTestInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate_percent
                .ok_or("--annual-rate-percent is required (or provide --input)")?,
            tenure_months: args.tenure.require()?,
            rate_shocks_percent: args.shocks,
        },
    };

    let result = stress::stress_test_emi(&stress_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let afford_input = match input::read_structured::<AffordabilityInput>(args.input.as_deref())? {
        Some(data) => data,
        None => AffordabilityInput {
            installment: args
                .installment
                .ok_or("--installment is required (or provide --input)")?,
            monthly_income: args
                .monthly_income
                .ok_or("--monthly-income is required (or provide --input)")?,
            monthly_expenses: args.monthly_expenses.unwrap_or(Decimal::ZERO),
            existing_monthly_obligations: args
                .existing_monthly_obligations
                .unwrap_or(Decimal::ZERO),
        },
    };

    let result = stress::assess_affordability(&afford_input)?;
    Ok(serde_json::to_value(result)?)
}
