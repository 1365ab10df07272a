use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use sarvasva_core::prepayment::charges::{self, PrepaymentInput};

use crate::input;

/// Arguments for part-payment charges
#[derive(Args)]
pub struct PrepaymentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount originally disbursed
    #[arg(long)]
    pub disbursed_amount: Option<Decimal>,

    /// Part payment being made now
    #[arg(long, alias = "part-payment")]
    pub current_part_payment: Option<Decimal>,

    /// Sum of earlier part payments
    #[arg(long)]
    pub past_prepayments: Option<Decimal>,

    /// Disbursement date (YYYY-MM-DD)
    #[arg(long)]
    pub disbursed_on: Option<NaiveDate>,

    /// Prepayment date (YYYY-MM-DD)
    #[arg(long)]
    pub prepaid_on: Option<NaiveDate>,
}

pub fn run_prepayment_charges(args: PrepaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let prepay_input = match input::read_structured::<PrepaymentInput>(args.input.as_deref())? {
        Some(data) => data,
        None => PrepaymentInput {
            disbursed_amount: args
                .disbursed_amount
                .ok_or("--disbursed-amount is required (or provide --input)")?,
            current_part_payment: args
                .current_part_payment
                .ok_or("--current-part-payment is required (or provide --input)")?,
            past_prepayments: args.past_prepayments.unwrap_or(Decimal::ZERO),
            disbursed_on: args.disbursed_on,
            prepaid_on: args.prepaid_on,
        },
    };

    let result = charges::assess_prepayment_charges(&prepay_input)?;
    Ok(serde_json::to_value(result)?)
}
