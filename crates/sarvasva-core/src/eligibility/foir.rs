use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::time_value::{annuity_present_value, monthly_rate};
use crate::{SarvasvaResult, types::*};

/// Fixed obligations to income ratio: share of income available for EMIs.
pub const FOIR: Rate = dec!(0.40);

/// Recommended EMI band as a share of surplus income.
const SAFE_BAND_LOW: Rate = dec!(0.35);
const SAFE_BAND_HIGH: Rate = dec!(0.45);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Deserialises through [`FromStr`], so unknown employers become `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum EmployerCategory {
    GovernmentPsu,
    MncListed,
    SelfEmployed,
    #[default]
    Other,
}

impl EmployerCategory {
    pub fn multiplier(&self) -> Multiple {
        match self {
            EmployerCategory::GovernmentPsu => dec!(1.10),
            EmployerCategory::MncListed => dec!(1.08),
            EmployerCategory::SelfEmployed => dec!(0.90),
            EmployerCategory::Other => Decimal::ONE,
        }
    }
}

impl fmt::Display for EmployerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EmployerCategory::GovernmentPsu => "Government / PSU",
            EmployerCategory::MncListed => "MNC / Listed Company",
            EmployerCategory::SelfEmployed => "Self Employed",
            EmployerCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

impl FromStr for EmployerCategory {
    type Err = std::convert::Infallible;

    /// Unrecognised employers fall back to the neutral category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Ok(match key.as_str() {
            "government" | "governmentpsu" | "psu" | "gov" => EmployerCategory::GovernmentPsu,
            "mnc" | "mnclisted" | "mnclistedcompany" | "listed" => EmployerCategory::MncListed,
            "selfemployed" | "self" => EmployerCategory::SelfEmployed,
            _ => EmployerCategory::Other,
        })
    }
}

impl From<String> for EmployerCategory {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityInput {
    pub monthly_income: Money,
    #[serde(default)]
    pub monthly_expenses: Money,
    #[serde(default)]
    pub existing_monthly_obligations: Money,
    pub tenure_months: u32,
    pub annual_rate_percent: Percent,
    #[serde(default)]
    pub employer_category: EmployerCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeInstallmentBand {
    pub min: Money,
    pub max: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    pub existing_monthly_obligations: Money,
    pub foir_ratio: Rate,
    pub max_affordable_installment: Money,
    pub tenure_months: u32,
    pub employer_category: EmployerCategory,
    pub employer_category_multiplier: Multiple,
    /// Loan the affordable installment services, before the employer adjustment.
    pub base_eligible_principal: Money,
    pub eligible_principal: Money,
    pub surplus_income: Money,
    pub safe_installment_band: SafeInstallmentBand,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Largest loan a borrower qualifies for under the FOIR rule.
pub fn estimate_eligibility(
    input: &EligibilityInput,
) -> SarvasvaResult<ComputationOutput<EligibilityAssessment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let income = input.monthly_income.max(Decimal::ZERO);
    let expenses = input.monthly_expenses.max(Decimal::ZERO);
    let obligations = input.existing_monthly_obligations.max(Decimal::ZERO);
    let rate = input.annual_rate_percent.max(Decimal::ZERO);
    let tenure = input.tenure_months.max(1);

    if input.tenure_months == 0 {
        warnings.push("Tenure of zero months treated as one month.".into());
    }

    let max_installment = (income * FOIR - obligations).max(Decimal::ZERO);
    if max_installment.is_zero() && !income.is_zero() {
        warnings.push("Existing obligations already consume the FOIR allowance.".into());
    }

    let base_principal = annuity_present_value(max_installment, monthly_rate(rate), tenure)?;
    let multiplier = input.employer_category.multiplier();
    let eligible = base_principal * multiplier;

    let surplus = (income - expenses - obligations).max(Decimal::ZERO);

    let output = EligibilityAssessment {
        monthly_income: income,
        monthly_expenses: expenses,
        existing_monthly_obligations: obligations,
        foir_ratio: FOIR,
        max_affordable_installment: max_installment,
        tenure_months: tenure,
        employer_category: input.employer_category,
        employer_category_multiplier: multiplier,
        base_eligible_principal: base_principal,
        eligible_principal: eligible,
        surplus_income: surplus,
        safe_installment_band: SafeInstallmentBand {
            min: surplus * SAFE_BAND_LOW,
            max: surplus * SAFE_BAND_HIGH,
        },
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "foir": FOIR.to_string(),
        "annual_rate_percent": rate.to_string(),
        "employer_category": input.employer_category.to_string(),
        "safe_band": [SAFE_BAND_LOW.to_string(), SAFE_BAND_HIGH.to_string()],
    });

    Ok(with_metadata(
        "FOIR eligibility (annuity present value of affordable EMI)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn salaried() -> EligibilityInput {
        EligibilityInput {
            monthly_income: dec!(50_000),
            monthly_expenses: dec!(20_000),
            existing_monthly_obligations: Decimal::ZERO,
            tenure_months: 24,
            annual_rate_percent: dec!(10.99),
            employer_category: EmployerCategory::Other,
        }
    }

    #[test]
    fn test_foir_installment() {
        let out = estimate_eligibility(&salaried()).unwrap().result;
        assert_eq!(out.max_affordable_installment, dec!(20_000));
        assert_eq!(out.foir_ratio, dec!(0.40));
    }

    #[test]
    fn test_eligible_principal() {
        let out = estimate_eligibility(&salaried()).unwrap().result;
        // PV of 20k/month over 24 months at 10.99% ≈ 429,155.12
        assert!((out.eligible_principal - dec!(429_155.12)).abs() < dec!(0.01));
        assert_eq!(out.base_eligible_principal, out.eligible_principal);
    }

    #[test]
    fn test_obligations_reduce_installment() {
        let mut input = salaried();
        input.existing_monthly_obligations = dec!(5_000);
        let out = estimate_eligibility(&input).unwrap().result;
        assert_eq!(out.max_affordable_installment, dec!(15_000));
        assert_eq!(out.surplus_income, dec!(25_000));
    }

    #[test]
    fn test_obligations_above_foir_give_zero() {
        let mut input = salaried();
        input.existing_monthly_obligations = dec!(25_000);
        let out = estimate_eligibility(&input).unwrap();
        assert_eq!(out.result.max_affordable_installment, Decimal::ZERO);
        assert_eq!(out.result.eligible_principal, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_safe_band() {
        let out = estimate_eligibility(&salaried()).unwrap().result;
        assert_eq!(out.safe_installment_band.min, dec!(10_500));
        assert_eq!(out.safe_installment_band.max, dec!(13_500));
    }

    #[test]
    fn test_zero_rate_is_installment_times_tenure() {
        let mut input = salaried();
        input.annual_rate_percent = Decimal::ZERO;
        let out = estimate_eligibility(&input).unwrap().result;
        assert_eq!(out.eligible_principal, dec!(480_000));
    }

    #[test]
    fn test_negative_inputs_clamped() {
        let input = EligibilityInput {
            monthly_income: dec!(-10),
            monthly_expenses: dec!(-10),
            existing_monthly_obligations: dec!(-10),
            tenure_months: 0,
            annual_rate_percent: dec!(-5),
            employer_category: EmployerCategory::Other,
        };
        let out = estimate_eligibility(&input).unwrap();
        assert_eq!(out.result.eligible_principal, Decimal::ZERO);
        assert_eq!(out.result.tenure_months, 1);
        assert_eq!(out.result.safe_installment_band.max, Decimal::ZERO);
    }

    #[test]
    fn test_employer_multipliers() {
        assert_eq!(EmployerCategory::GovernmentPsu.multiplier(), dec!(1.10));
        assert_eq!(EmployerCategory::MncListed.multiplier(), dec!(1.08));
        assert_eq!(EmployerCategory::SelfEmployed.multiplier(), dec!(0.90));
        assert_eq!(EmployerCategory::Other.multiplier(), dec!(1));
    }

    #[test]
    fn test_parse_employer_labels() {
        let parse = |s: &str| s.parse::<EmployerCategory>().unwrap();
        assert_eq!(parse("Government / PSU"), EmployerCategory::GovernmentPsu);
        assert_eq!(parse("MNC / Listed Company"), EmployerCategory::MncListed);
        assert_eq!(parse("Self Employed"), EmployerCategory::SelfEmployed);
        assert_eq!(parse("self-employed"), EmployerCategory::SelfEmployed);
        assert_eq!(parse("Employer Name"), EmployerCategory::Other);
    }
}
