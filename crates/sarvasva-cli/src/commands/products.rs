use clap::Args;
use serde_json::Value;

use sarvasva_core::products::{self, LoanType};

/// Arguments for the product catalogue listing
#[derive(Args)]
pub struct ProductsArgs {
    /// Show a single product instead of the whole catalogue
    #[arg(long)]
    pub loan_type: Option<LoanType>,
}

pub fn run_products(args: ProductsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let listing = match args.loan_type {
        Some(lt) => vec![lt.product()],
        None => products::catalogue(),
    };
    Ok(serde_json::json!({ "result": { "products": listing } }))
}
