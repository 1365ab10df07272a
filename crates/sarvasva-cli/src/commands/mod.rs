pub mod comparison;
pub mod eligibility;
pub mod emi;
pub mod prepayment;
pub mod products;

use clap::Args;
use sarvasva_core::Tenure;

/// Tenure given either in months or in years
#[derive(Args, Debug, Clone)]
pub struct TenureArgs {
    /// Tenure in months
    #[arg(long, conflicts_with = "tenure_years")]
    pub tenure_months: Option<u32>,

    /// Tenure in years
    #[arg(long)]
    pub tenure_years: Option<u32>,
}

impl TenureArgs {
    pub fn months(&self) -> Option<u32> {
        match (self.tenure_months, self.tenure_years) {
            (Some(m), _) => Some(Tenure::Months(m).months()),
            (None, Some(y)) => Some(Tenure::Years(y).months()),
            (None, None) => None,
        }
    }

    pub fn require(&self) -> Result<u32, Box<dyn std::error::Error>> {
        self.months()
            .ok_or_else(|| "--tenure-months or --tenure-years is required (or provide --input)".into())
    }
}
