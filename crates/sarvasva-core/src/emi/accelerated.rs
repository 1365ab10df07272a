//! Faster closure through a fixed extra payment every month.
//!
//! The loan is stepped month by month at `base installment + extra` until the
//! balance is cleared. The final month pays only the outstanding balance and
//! its interest, so the totals reflect what the borrower actually hands over.
//! A loan that is still open after [`MAX_PAYOFF_MONTHS`] is reported as
//! non-convergent rather than truncated.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::amortization::compute_amortization;
use super::{validate_params, LoanParameters};
use crate::error::SarvasvaError;
use crate::types::*;
use crate::SarvasvaResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Safety bound on the month-by-month simulation (50 years).
pub const MAX_PAYOFF_MONTHS: u32 = 600;

/// Balances at or below this are treated as settled (one paisa).
const BALANCE_EPSILON: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceleratedPayoff {
    /// Base installment plus the extra payment.
    pub installment: Money,
    pub base_installment: Money,
    pub extra_monthly_payment: Money,
    pub months_to_payoff: u32,
    /// What the closing month actually costs (balance plus its interest).
    pub final_installment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub interest_saved: Money,
    pub months_saved: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<AmortizationRow>>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simulate early closure with `extra_monthly_payment` on top of every EMI.
pub fn simulate_accelerated_payoff(
    params: &LoanParameters,
) -> SarvasvaResult<ComputationOutput<AcceleratedPayoff>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = compute_accelerated_payoff(params)?;

    if params.extra_monthly_payment.is_zero() {
        warnings.push("No extra payment supplied; payoff follows the regular schedule.".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "max_months": MAX_PAYOFF_MONTHS,
        "extra_monthly_payment": params.extra_monthly_payment.to_string(),
        "final_month": "balance plus interest only",
    });

    Ok(with_metadata(
        "Month-by-month reducing balance with fixed extra payment",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Accelerated payoff without the metadata envelope.
pub fn compute_accelerated_payoff(params: &LoanParameters) -> SarvasvaResult<AcceleratedPayoff> {
    validate_params(params)?;

    let baseline = compute_amortization(&LoanParameters {
        include_schedule: false,
        ..params.clone()
    })?;
    let r = baseline.monthly_rate;
    let installment = baseline.installment + params.extra_monthly_payment;

    let mut balance = params.principal;
    let mut months: u32 = 0;
    let mut total_payment = Decimal::ZERO;
    let mut final_installment = installment;
    let mut rows = Vec::new();

    while balance > Decimal::ZERO {
        if months >= MAX_PAYOFF_MONTHS {
            tracing::warn!(
                %installment,
                %balance,
                "accelerated payoff did not clear the balance within the cap"
            );
            return Err(SarvasvaError::NonConvergent {
                function: "accelerated payoff".into(),
                iterations: MAX_PAYOFF_MONTHS,
                residual: balance,
            });
        }

        let interest = balance * r;
        let principal_part = (installment - interest).max(Decimal::ZERO);
        months += 1;

        let opening = balance;
        let (payment, repaid) = if principal_part + BALANCE_EPSILON >= balance {
            (balance + interest, balance)
        } else {
            (installment, principal_part)
        };
        balance -= repaid;
        total_payment += payment;
        final_installment = payment;

        if params.include_schedule {
            rows.push(AmortizationRow {
                month: months,
                opening_balance: opening,
                installment: payment,
                interest,
                principal: repaid,
                closing_balance: balance,
            });
        }
    }

    let total_interest = total_payment - params.principal;
    let interest_saved = baseline.total_interest - total_interest;
    let months_saved = baseline.tenure_months.saturating_sub(months);

    tracing::debug!(months, %interest_saved, "accelerated payoff settled");

    Ok(AcceleratedPayoff {
        installment,
        base_installment: baseline.installment,
        extra_monthly_payment: params.extra_monthly_payment,
        months_to_payoff: months,
        final_installment,
        total_payment,
        total_interest,
        interest_saved,
        months_saved,
        schedule: if params.include_schedule { Some(rows) } else { None },
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{msg}: expected ~{expected}, got {actual} (diff = {diff})"
        );
    }

    fn personal_loan(extra: Decimal) -> LoanParameters {
        LoanParameters::new(dec!(100_000), dec!(10.99), 24).with_extra(extra)
    }

    #[test]
    fn test_zero_extra_reproduces_baseline() {
        let out = compute_accelerated_payoff(&personal_loan(Decimal::ZERO)).unwrap();
        assert_eq!(out.installment, out.base_installment);
        assert!((23..=25).contains(&out.months_to_payoff));
        assert_close(out.interest_saved, Decimal::ZERO, dec!(0.05), "interest saved");
    }

    #[test]
    fn test_extra_shortens_tenure() {
        let out = compute_accelerated_payoff(&personal_loan(dec!(1000))).unwrap();
        assert_eq!(out.months_to_payoff, 20);
        assert_eq!(out.months_saved, 4);
        assert!(out.interest_saved > Decimal::ZERO);
        assert!(out.final_installment < out.installment);
    }

    #[test]
    fn test_totals_balance() {
        let out = compute_accelerated_payoff(&personal_loan(dec!(2500))).unwrap();
        assert_eq!(out.total_interest, out.total_payment - dec!(100_000));
        let regular = out.installment * Decimal::from(out.months_to_payoff - 1);
        assert_close(out.total_payment, regular + out.final_installment, dec!(0.000001), "total");
    }

    #[test]
    fn test_huge_extra_closes_in_one_month() {
        let out = compute_accelerated_payoff(&personal_loan(dec!(500_000))).unwrap();
        assert_eq!(out.months_to_payoff, 1);
        // One month of interest on the full principal
        assert_close(out.total_interest, dec!(915.83), dec!(0.01), "one month interest");
    }

    #[test]
    fn test_zero_rate_with_extra() {
        let params = LoanParameters::new(dec!(12_000), Decimal::ZERO, 12).with_extra(dec!(1000));
        let out = compute_accelerated_payoff(&params).unwrap();
        assert_eq!(out.months_to_payoff, 6);
        assert_eq!(out.total_interest, Decimal::ZERO);
        assert_eq!(out.interest_saved, Decimal::ZERO);
    }

    #[test]
    fn test_tenure_beyond_cap_is_non_convergent() {
        // 70-year tenure with no extra cannot clear within 600 months
        let params = LoanParameters::new(dec!(1_000_000), dec!(9), 840);
        match compute_accelerated_payoff(&params).unwrap_err() {
            SarvasvaError::NonConvergent { iterations, residual, .. } => {
                assert_eq!(iterations, MAX_PAYOFF_MONTHS);
                assert!(residual > Decimal::ZERO);
            }
            other => panic!("Expected NonConvergent, got {other:?}"),
        }
    }

    #[test]
    fn test_schedule_matches_month_count() {
        let mut params = personal_loan(dec!(1000));
        params.include_schedule = true;
        let out = compute_accelerated_payoff(&params).unwrap();
        let schedule = out.schedule.unwrap();
        assert_eq!(schedule.len() as u32, out.months_to_payoff);
        assert_eq!(schedule.last().unwrap().closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_negative_extra_rejected() {
        let err = compute_accelerated_payoff(&personal_loan(dec!(-1))).unwrap_err();
        match err {
            SarvasvaError::InvalidInput { field, .. } => assert_eq!(field, "extra_monthly_payment"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_extra_warns() {
        let out = simulate_accelerated_payoff(&personal_loan(Decimal::ZERO)).unwrap();
        assert_eq!(out.warnings.len(), 1);
    }
}
