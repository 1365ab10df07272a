use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::amortization::compute_amortization;
use super::LoanParameters;
use crate::{SarvasvaError, SarvasvaResult, types::*};

/// Installment / income above this is aggressive.
const AGGRESSIVE_RATIO: Rate = dec!(0.4);
/// Installment / income above this is risky.
const RISKY_RATIO: Rate = dec!(0.6);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressTestInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub tenure_months: u32,
    /// Rate shocks in percentage points; defaults to +0, +1 and +2.
    #[serde(default = "default_shocks")]
    pub rate_shocks_percent: Vec<Percent>,
}

fn default_shocks() -> Vec<Percent> {
    vec![dec!(0), dec!(1), dec!(2)]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressScenario {
    pub shock_percent: Percent,
    pub stressed_rate_percent: Percent,
    pub installment: Money,
    /// Installment increase over the unshocked EMI.
    pub increase: Money,
    pub total_interest: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressTestResult {
    pub base_installment: Money,
    pub scenarios: Vec<StressScenario>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    Safe,
    Aggressive,
    Risky,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    pub installment: Money,
    pub monthly_income: Money,
    #[serde(default)]
    pub monthly_expenses: Money,
    #[serde(default)]
    pub existing_monthly_obligations: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub installment: Money,
    pub surplus_income: Money,
    /// Surplus income, or gross income when nothing is left over.
    pub effective_income: Money,
    pub installment_to_income: Rate,
    pub risk_label: RiskLabel,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// EMI under a set of interest-rate shocks.
pub fn stress_test_emi(
    input: &StressTestInput,
) -> SarvasvaResult<ComputationOutput<StressTestResult>> {
    let start = Instant::now();

    if input.rate_shocks_percent.is_empty() {
        return Err(SarvasvaError::InsufficientData(
            "At least one rate shock is required.".into(),
        ));
    }
    if let Some(bad) = input.rate_shocks_percent.iter().find(|s| **s < Decimal::ZERO) {
        return Err(SarvasvaError::InvalidInput {
            field: "rate_shocks_percent".into(),
            reason: format!("Rate shocks must be non-negative, got {bad}"),
        });
    }

    let base_params = LoanParameters::new(
        input.principal,
        input.annual_rate_percent,
        input.tenure_months,
    );
    let base = compute_amortization(&base_params)?;

    let scenarios = input
        .rate_shocks_percent
        .iter()
        .map(|shock| -> SarvasvaResult<StressScenario> {
            let stressed_rate = input.annual_rate_percent + shock;
            let stressed = compute_amortization(&LoanParameters {
                annual_rate_percent: stressed_rate,
                ..base_params.clone()
            })?;
            Ok(StressScenario {
                shock_percent: *shock,
                stressed_rate_percent: stressed_rate,
                installment: stressed.installment,
                increase: stressed.installment - base.installment,
                total_interest: stressed.total_interest,
            })
        })
        .collect::<SarvasvaResult<Vec<_>>>()?;

    let output = StressTestResult {
        base_installment: base.installment,
        scenarios,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "shock_unit": "percentage points added to the annual rate",
        "tenure_months": input.tenure_months,
    });

    Ok(with_metadata(
        "EMI rate-shock stress test",
        &assumptions,
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Label an installment against the income left after expenses and obligations.
pub fn assess_affordability(
    input: &AffordabilityInput,
) -> SarvasvaResult<ComputationOutput<AffordabilityAssessment>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if input.installment < Decimal::ZERO {
        return Err(SarvasvaError::InvalidInput {
            field: "installment".into(),
            reason: "Installment cannot be negative".into(),
        });
    }

    let income = input.monthly_income.max(Decimal::ZERO);
    let expenses = input.monthly_expenses.max(Decimal::ZERO);
    let obligations = input.existing_monthly_obligations.max(Decimal::ZERO);

    let surplus = (income - expenses - obligations).max(Decimal::ZERO);
    let effective_income = if surplus.is_zero() { income } else { surplus };
    if surplus.is_zero() && !income.is_zero() {
        warnings.push("No surplus after expenses; ratio measured against gross income.".into());
    }

    let ratio = if effective_income.is_zero() {
        Decimal::ZERO
    } else {
        input.installment / effective_income
    };

    let output = AffordabilityAssessment {
        installment: input.installment,
        surplus_income: surplus,
        effective_income,
        installment_to_income: ratio,
        risk_label: classify(ratio),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "aggressive_above": AGGRESSIVE_RATIO.to_string(),
        "risky_above": RISKY_RATIO.to_string(),
    });

    Ok(with_metadata(
        "EMI to surplus-income affordability",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

fn classify(ratio: Rate) -> RiskLabel {
    if ratio > RISKY_RATIO {
        RiskLabel::Risky
    } else if ratio > AGGRESSIVE_RATIO {
        RiskLabel::Aggressive
    } else {
        RiskLabel::Safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stress_input() -> StressTestInput {
        StressTestInput {
            principal: dec!(100_000),
            annual_rate_percent: dec!(10.99),
            tenure_months: 24,
            rate_shocks_percent: default_shocks(),
        }
    }

    #[test]
    fn test_zero_shock_matches_base() {
        let out = stress_test_emi(&stress_input()).unwrap().result;
        assert_eq!(out.scenarios.len(), 3);
        assert_eq!(out.scenarios[0].installment, out.base_installment);
        assert_eq!(out.scenarios[0].increase, Decimal::ZERO);
    }

    #[test]
    fn test_installment_rises_with_shock() {
        let out = stress_test_emi(&stress_input()).unwrap().result;
        assert!(out.scenarios[1].installment > out.scenarios[0].installment);
        assert!(out.scenarios[2].installment > out.scenarios[1].installment);
        assert_eq!(out.scenarios[2].stressed_rate_percent, dec!(12.99));
    }

    #[test]
    fn test_negative_shock_rejected() {
        let mut input = stress_input();
        input.rate_shocks_percent = vec![dec!(-1)];
        assert!(matches!(
            stress_test_emi(&input).unwrap_err(),
            SarvasvaError::InvalidInput { .. }
        ));
    }

    #[test]
    fn test_empty_shocks_rejected() {
        let mut input = stress_input();
        input.rate_shocks_percent.clear();
        assert!(matches!(
            stress_test_emi(&input).unwrap_err(),
            SarvasvaError::InsufficientData(_)
        ));
    }

    #[test]
    fn test_default_shocks_from_json() {
        let input: StressTestInput = serde_json::from_str(
            r#"{"principal": "100000", "annual_rate_percent": "10.99", "tenure_months": 24}"#,
        )
        .unwrap();
        assert_eq!(input.rate_shocks_percent, default_shocks());
    }

    fn afford(installment: Decimal) -> AffordabilityAssessment {
        assess_affordability(&AffordabilityInput {
            installment,
            monthly_income: dec!(50_000),
            monthly_expenses: dec!(20_000),
            existing_monthly_obligations: Decimal::ZERO,
        })
        .unwrap()
        .result
    }

    #[test]
    fn test_labels_by_ratio() {
        // surplus 30k: 12k = 0.4 (safe), 15k = 0.5, 20k = 0.67
        assert_eq!(afford(dec!(12_000)).risk_label, RiskLabel::Safe);
        assert_eq!(afford(dec!(15_000)).risk_label, RiskLabel::Aggressive);
        assert_eq!(afford(dec!(20_000)).risk_label, RiskLabel::Risky);
    }

    #[test]
    fn test_no_surplus_falls_back_to_income() {
        let out = assess_affordability(&AffordabilityInput {
            installment: dec!(10_000),
            monthly_income: dec!(40_000),
            monthly_expenses: dec!(45_000),
            existing_monthly_obligations: Decimal::ZERO,
        })
        .unwrap();
        assert_eq!(out.result.surplus_income, Decimal::ZERO);
        assert_eq!(out.result.effective_income, dec!(40_000));
        assert_eq!(out.result.installment_to_income, dec!(0.25));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_zero_income_is_safe_ratio_zero() {
        let out = assess_affordability(&AffordabilityInput {
            installment: dec!(5_000),
            monthly_income: Decimal::ZERO,
            monthly_expenses: Decimal::ZERO,
            existing_monthly_obligations: Decimal::ZERO,
        })
        .unwrap()
        .result;
        assert_eq!(out.installment_to_income, Decimal::ZERO);
        assert_eq!(out.risk_label, RiskLabel::Safe);
    }
}
