use clap::Args;
use serde_json::Value;

use sarvasva_core::comparison::lenders::{self, LenderComparisonInput};

use crate::input;

/// Arguments for lender comparison
#[derive(Args)]
pub struct CompareLendersArgs {
    /// Path to JSON input file with principal, tenure_months and offers
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compare_lenders(args: CompareLendersArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let compare_input = input::read_structured::<LenderComparisonInput>(args.input.as_deref())?
        .ok_or("--input file (or JSON on stdin) is required for lender comparison")?;

    let result = lenders::compare_lenders(&compare_input)?;
    Ok(serde_json::to_value(result)?)
}
