use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values (rupees). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Ratios expressed as decimals (0.40 = 40%).
pub type Rate = Decimal;

/// Rates quoted the way lenders quote them (10.99 = 10.99% p.a.).
pub type Percent = Decimal;

/// Multipliers applied to a base amount (1.10 = +10%).
pub type Multiple = Decimal;

/// Loan tenure as entered by a borrower: whole years or whole months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tenure {
    Months(u32),
    Years(u32),
}

impl Tenure {
    /// Tenure in months, never less than one.
    pub fn months(&self) -> u32 {
        let m = match *self {
            Tenure::Months(m) => m,
            Tenure::Years(y) => y.saturating_mul(12),
        };
        m.max(1)
    }
}

impl Default for Tenure {
    fn default() -> Self {
        Tenure::Years(2)
    }
}

/// One month of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: Money,
    pub installment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenure_years_to_months() {
        assert_eq!(Tenure::Years(2).months(), 24);
        assert_eq!(Tenure::Months(18).months(), 18);
    }

    #[test]
    fn test_tenure_floor_of_one_month() {
        assert_eq!(Tenure::Months(0).months(), 1);
        assert_eq!(Tenure::Years(0).months(), 1);
    }

    #[test]
    fn test_tenure_serde_shape() {
        let t: Tenure = serde_json::from_str(r#"{"years": 5}"#).unwrap();
        assert_eq!(t, Tenure::Years(5));
    }
}
