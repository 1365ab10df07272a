//! Retail loan product catalogue.
//!
//! Each product carries the amount, rate and tenure bounds the calculator
//! screens offer. Scenarios outside those bounds are still computed; the
//! catalogue only turns them into warnings.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{Money, Percent};

/// Deserialises from keys (`two_wheeler`, `twoWheeler`) and labels alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum LoanType {
    #[default]
    Personal,
    Home,
    Business,
    Car,
    TwoWheeler,
}

/// Bounds and defaults for one loan product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProduct {
    pub loan_type: LoanType,
    pub label: String,
    pub min_amount: Money,
    pub max_amount: Money,
    pub default_amount: Money,
    pub min_rate_percent: Percent,
    pub max_rate_percent: Percent,
    pub default_rate_percent: Percent,
    pub max_years: u32,
}

impl LoanType {
    pub const ALL: [LoanType; 5] = [
        LoanType::Personal,
        LoanType::Home,
        LoanType::Business,
        LoanType::Car,
        LoanType::TwoWheeler,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LoanType::Personal => "Personal Loan",
            LoanType::Home => "Home Loan",
            LoanType::Business => "Business Loan",
            LoanType::Car => "Car Loan",
            LoanType::TwoWheeler => "Two Wheeler Loan",
        }
    }

    pub fn product(&self) -> LoanProduct {
        // (min, max, default amount), (min, max, default rate), max years
        let ((min_a, max_a, def_a), (min_r, max_r, def_r), max_years) = match self {
            LoanType::Personal => (
                (dec!(40_000), dec!(3_500_000), dec!(100_000)),
                (dec!(10.99), dec!(24), dec!(10.99)),
                6,
            ),
            LoanType::Home => (
                (dec!(500_000), dec!(20_000_000), dec!(2_500_000)),
                (dec!(8.25), dec!(12), dec!(8.5)),
                30,
            ),
            LoanType::Business => (
                (dec!(100_000), dec!(5_000_000), dec!(500_000)),
                (dec!(11), dec!(24), dec!(12.5)),
                8,
            ),
            LoanType::Car => (
                (dec!(100_000), dec!(2_000_000), dec!(600_000)),
                (dec!(8.5), dec!(14), dec!(9.25)),
                7,
            ),
            LoanType::TwoWheeler => (
                (dec!(30_000), dec!(300_000), dec!(90_000)),
                (dec!(9.5), dec!(20), dec!(11.5)),
                5,
            ),
        };

        LoanProduct {
            loan_type: *self,
            label: self.label().to_string(),
            min_amount: min_a,
            max_amount: max_a,
            default_amount: def_a,
            min_rate_percent: min_r,
            max_rate_percent: max_r,
            default_rate_percent: def_r,
            max_years,
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LoanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "personal" | "personalloan" => Ok(LoanType::Personal),
            "home" | "homeloan" => Ok(LoanType::Home),
            "business" | "businessloan" => Ok(LoanType::Business),
            "car" | "carloan" => Ok(LoanType::Car),
            "twowheeler" | "twowheelerloan" => Ok(LoanType::TwoWheeler),
            _ => Err(format!("unknown loan type '{s}'")),
        }
    }
}

impl TryFrom<String> for LoanType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Full catalogue in display order.
pub fn catalogue() -> Vec<LoanProduct> {
    LoanType::ALL.iter().map(LoanType::product).collect()
}

/// Warnings for a scenario that falls outside the product's bounds.
pub fn check_scenario(
    loan_type: LoanType,
    principal: Money,
    annual_rate_percent: Percent,
    tenure_months: u32,
) -> Vec<String> {
    let p = loan_type.product();
    let mut warnings = Vec::new();

    if principal < p.min_amount || principal > p.max_amount {
        warnings.push(format!(
            "{} amount {} is outside the offered range {} to {}",
            p.label, principal, p.min_amount, p.max_amount
        ));
    }
    if annual_rate_percent < p.min_rate_percent || annual_rate_percent > p.max_rate_percent {
        warnings.push(format!(
            "{} rate {}% is outside the offered range {}% to {}%",
            p.label, annual_rate_percent, p.min_rate_percent, p.max_rate_percent
        ));
    }
    let max_months = p.max_years * 12;
    if tenure_months > max_months {
        warnings.push(format!(
            "{} tenure of {} months exceeds the maximum of {} years",
            p.label, tenure_months, p.max_years
        ));
    }

    if !warnings.is_empty() {
        tracing::debug!(loan_type = %loan_type, count = warnings.len(), "scenario outside product bounds");
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_catalogue_has_all_products() {
        let all = catalogue();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].label, "Personal Loan");
    }

    #[test]
    fn test_defaults_sit_inside_bounds() {
        for p in catalogue() {
            assert!(p.default_amount >= p.min_amount && p.default_amount <= p.max_amount);
            assert!(
                p.default_rate_percent >= p.min_rate_percent
                    && p.default_rate_percent <= p.max_rate_percent
            );
        }
    }

    #[test]
    fn test_in_range_scenario_has_no_warnings() {
        let w = check_scenario(LoanType::Personal, dec!(100_000), dec!(10.99), 24);
        assert!(w.is_empty());
    }

    #[test]
    fn test_out_of_range_scenario_warns_per_dimension() {
        let w = check_scenario(LoanType::TwoWheeler, dec!(500_000), dec!(30), 120);
        assert_eq!(w.len(), 3);
    }

    #[test]
    fn test_parse_loan_type_labels() {
        assert_eq!("Two Wheeler Loan".parse::<LoanType>().unwrap(), LoanType::TwoWheeler);
        assert_eq!("two-wheeler".parse::<LoanType>().unwrap(), LoanType::TwoWheeler);
        assert_eq!("HOME".parse::<LoanType>().unwrap(), LoanType::Home);
        assert!("boat".parse::<LoanType>().is_err());
    }

    #[test]
    fn test_loan_type_json_accepts_keys_and_labels() {
        for raw in [r#""twoWheeler""#, r#""two_wheeler""#, r#""Two Wheeler Loan""#] {
            let parsed: LoanType = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, LoanType::TwoWheeler);
        }
        assert!(serde_json::from_str::<LoanType>(r#""boat""#).is_err());
    }

    #[test]
    fn test_loan_type_serialises_as_snake_case() {
        let json = serde_json::to_string(&LoanType::TwoWheeler).unwrap();
        assert_eq!(json, r#""two_wheeler""#);
        let back: LoanType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LoanType::TwoWheeler);
    }
}
