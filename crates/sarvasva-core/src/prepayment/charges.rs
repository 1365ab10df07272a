//! Part-payment charges.
//!
//! Borrowers may prepay up to a quarter of the disbursed amount without a
//! penalty. Everything prepaid above that line (this payment plus earlier
//! ones) is chargeable at a flat rate.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{SarvasvaError, SarvasvaResult, types::*};

/// Share of the disbursed amount that may be prepaid free of charge.
pub const NO_PENALTY_SHARE: Rate = dec!(0.25);

/// Flat charge on the chargeable part, in percent. Not user-configurable.
pub const CHARGE_RATE_PERCENT: Percent = dec!(4.5);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentInput {
    pub disbursed_amount: Money,
    pub current_part_payment: Money,
    #[serde(default)]
    pub past_prepayments: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disbursed_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepaid_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentAssessment {
    pub disbursed_amount: Money,
    pub current_part_payment: Money,
    pub past_prepayments: Money,
    pub no_penalty_threshold: Money,
    pub total_prepaid_to_date: Money,
    pub within_free_limit: bool,
    pub chargeable_amount: Money,
    pub charge_rate_percent: Percent,
    pub charge_amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_since_disbursement: Option<u32>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Charges due on a part payment, given everything prepaid so far.
pub fn assess_prepayment_charges(
    input: &PrepaymentInput,
) -> SarvasvaResult<ComputationOutput<PrepaymentAssessment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let months_since_disbursement = loan_age_months(input)?;

    let disbursed = clamp_non_negative(input.disbursed_amount, "disbursed_amount", &mut warnings);
    let current = clamp_non_negative(input.current_part_payment, "current_part_payment", &mut warnings);
    let past = clamp_non_negative(input.past_prepayments, "past_prepayments", &mut warnings);

    let output = compute_charges(disbursed, current, past, months_since_disbursement);

    if output.total_prepaid_to_date > disbursed && !disbursed.is_zero() {
        warnings.push("Total prepaid exceeds the disbursed amount.".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "no_penalty_share": NO_PENALTY_SHARE.to_string(),
        "charge_rate_percent": CHARGE_RATE_PERCENT.to_string(),
    });

    Ok(with_metadata(
        "Part-payment charge above 25% free prepayment allowance",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Core charge arithmetic on already-clamped amounts.
pub fn compute_charges(
    disbursed_amount: Money,
    current_part_payment: Money,
    past_prepayments: Money,
    months_since_disbursement: Option<u32>,
) -> PrepaymentAssessment {
    let threshold = disbursed_amount * NO_PENALTY_SHARE;
    let total = current_part_payment + past_prepayments;
    let chargeable = (total - threshold).max(Decimal::ZERO);
    let rate = if chargeable > Decimal::ZERO {
        CHARGE_RATE_PERCENT
    } else {
        Decimal::ZERO
    };

    PrepaymentAssessment {
        disbursed_amount,
        current_part_payment,
        past_prepayments,
        no_penalty_threshold: threshold,
        total_prepaid_to_date: total,
        within_free_limit: total <= threshold,
        chargeable_amount: chargeable,
        charge_rate_percent: rate,
        charge_amount: chargeable * rate / dec!(100),
        months_since_disbursement,
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn clamp_non_negative(value: Money, field: &str, warnings: &mut Vec<String>) -> Money {
    if value < Decimal::ZERO {
        warnings.push(format!("{field} was negative and has been treated as zero."));
        Decimal::ZERO
    } else {
        value
    }
}

/// Whole months between disbursement and prepayment, when both dates are known.
fn loan_age_months(input: &PrepaymentInput) -> SarvasvaResult<Option<u32>> {
    let (from, to) = match (input.disbursed_on, input.prepaid_on) {
        (Some(from), Some(to)) => (from, to),
        _ => return Ok(None),
    };
    if to < from {
        return Err(SarvasvaError::InvalidInput {
            field: "prepaid_on".into(),
            reason: "Prepayment date cannot precede the disbursement date".into(),
        });
    }

    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    Ok(Some(months.max(0) as u32))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample() -> PrepaymentInput {
        PrepaymentInput {
            disbursed_amount: dec!(354_579),
            current_part_payment: dec!(4_000),
            past_prepayments: dec!(168_984),
            disbursed_on: None,
            prepaid_on: None,
        }
    }

    #[test]
    fn test_reference_case() {
        let out = assess_prepayment_charges(&sample()).unwrap().result;
        assert_eq!(out.total_prepaid_to_date, dec!(172_984));
        assert_eq!(out.no_penalty_threshold, dec!(88_644.75));
        assert_eq!(out.chargeable_amount, dec!(84_339.25));
        assert_eq!(out.charge_rate_percent, dec!(4.5));
        assert_eq!(out.charge_amount.round_dp(2), dec!(3_795.27));
        assert!(!out.within_free_limit);
    }

    #[test]
    fn test_exactly_at_threshold_is_free() {
        let out = compute_charges(dec!(400_000), dec!(60_000), dec!(40_000), None);
        assert_eq!(out.chargeable_amount, Decimal::ZERO);
        assert_eq!(out.charge_rate_percent, Decimal::ZERO);
        assert_eq!(out.charge_amount, Decimal::ZERO);
        assert!(out.within_free_limit);
    }

    #[test]
    fn test_just_above_threshold_is_charged() {
        let out = compute_charges(dec!(400_000), dec!(60_000), dec!(40_000.01), None);
        assert_eq!(out.chargeable_amount, dec!(0.01));
        assert_eq!(out.charge_rate_percent, dec!(4.5));
        assert!(out.charge_amount > Decimal::ZERO);
    }

    #[test]
    fn test_negative_inputs_clamped_with_warning() {
        let input = PrepaymentInput {
            past_prepayments: dec!(-500),
            ..sample()
        };
        let out = assess_prepayment_charges(&input).unwrap();
        assert_eq!(out.result.past_prepayments, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_months_since_disbursement() {
        let input = PrepaymentInput {
            disbursed_on: NaiveDate::from_ymd_opt(2023, 8, 11),
            prepaid_on: NaiveDate::from_ymd_opt(2025, 6, 3),
            ..sample()
        };
        let out = assess_prepayment_charges(&input).unwrap().result;
        // Aug 2023 -> Jun 2025 is 22 calendar months; the 3rd precedes the 11th
        assert_eq!(out.months_since_disbursement, Some(21));
    }

    #[test]
    fn test_prepayment_before_disbursement_rejected() {
        let input = PrepaymentInput {
            disbursed_on: NaiveDate::from_ymd_opt(2025, 1, 1),
            prepaid_on: NaiveDate::from_ymd_opt(2024, 12, 31),
            ..sample()
        };
        match assess_prepayment_charges(&input).unwrap_err() {
            SarvasvaError::InvalidInput { field, .. } => assert_eq!(field, "prepaid_on"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_dates_parse_from_json() {
        let input: PrepaymentInput = serde_json::from_str(
            r#"{
                "disbursed_amount": "100000",
                "current_part_payment": "1000",
                "disbursed_on": "2024-01-15",
                "prepaid_on": "2024-07-15"
            }"#,
        )
        .unwrap();
        let out = assess_prepayment_charges(&input).unwrap().result;
        assert_eq!(out.months_since_disbursement, Some(6));
        assert_eq!(out.past_prepayments, Decimal::ZERO);
    }
}
