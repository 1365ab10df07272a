use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::accelerated::MAX_PAYOFF_MONTHS;
use super::{validate_params, LoanParameters};
use crate::products;
use crate::time_value::{level_installment, monthly_rate};
use crate::types::*;
use crate::{SarvasvaError, SarvasvaResult};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub installment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub tenure_months: u32,
    pub monthly_rate: Rate,
    /// Principal as a fraction of everything repaid.
    pub principal_share: Rate,
    pub interest_share: Rate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<AmortizationRow>>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Equal monthly installment and repayment totals for a fixed-rate loan.
pub fn calculate_emi(
    params: &LoanParameters,
) -> SarvasvaResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();
    let warnings = match params.loan_type {
        Some(lt) => products::check_scenario(
            lt,
            params.principal,
            params.annual_rate_percent,
            params.tenure_months,
        ),
        None => Vec::new(),
    };

    let output = compute_amortization(params)?;

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "compounding": "monthly",
        "monthly_rate": output.monthly_rate.to_string(),
        "loan_type": params.loan_type,
    });

    Ok(with_metadata(
        "Level-installment amortization (reducing balance)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Baseline amortization without the metadata envelope.
pub fn compute_amortization(params: &LoanParameters) -> SarvasvaResult<AmortizationResult> {
    validate_params(params)?;
    if params.include_schedule && params.tenure_months > MAX_PAYOFF_MONTHS {
        return Err(SarvasvaError::InvalidInput {
            field: "tenure_months".into(),
            reason: format!(
                "A month-by-month schedule is limited to {MAX_PAYOFF_MONTHS} months, got {}",
                params.tenure_months
            ),
        });
    }

    let r = monthly_rate(params.annual_rate_percent);
    let n = params.tenure_months;
    let installment = level_installment(params.principal, r, n)?;
    let total_payment = installment * Decimal::from(n);
    let total_interest = total_payment - params.principal;

    let (principal_share, interest_share) = if total_payment.is_zero() {
        (Decimal::ONE, Decimal::ZERO)
    } else {
        (
            params.principal / total_payment,
            total_interest / total_payment,
        )
    };

    let schedule = if params.include_schedule {
        Some(level_schedule(params.principal, r, n, installment))
    } else {
        None
    };

    Ok(AmortizationResult {
        installment,
        total_payment,
        total_interest,
        tenure_months: n,
        monthly_rate: r,
        principal_share,
        interest_share,
        schedule,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Month-by-month schedule; the last row settles whatever balance remains.
fn level_schedule(principal: Money, r: Rate, n: u32, installment: Money) -> Vec<AmortizationRow> {
    let mut rows = Vec::new();
    let mut balance = principal;

    for month in 1..=n {
        let interest = balance * r;
        let (payment, principal_part) = if month == n {
            (balance + interest, balance)
        } else {
            (installment, installment - interest)
        };
        let closing = balance - principal_part;
        rows.push(AmortizationRow {
            month,
            opening_balance: balance,
            installment: payment,
            interest,
            principal: principal_part,
            closing_balance: closing,
        });
        balance = closing;
    }

    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
