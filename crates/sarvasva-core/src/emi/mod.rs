pub mod accelerated;
pub mod amortization;
pub mod stress;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::LoanType;
use crate::types::{Money, Percent};
use crate::{SarvasvaError, SarvasvaResult};

/// A borrower's loan scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub tenure_months: u32,
    /// Paid on top of the regular installment every month.
    #[serde(default)]
    pub extra_monthly_payment: Money,
    /// Product the scenario is checked against; out-of-range values only warn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_type: Option<LoanType>,
    #[serde(default)]
    pub include_schedule: bool,
}

impl LoanParameters {
    pub fn new(principal: Money, annual_rate_percent: Percent, tenure_months: u32) -> Self {
        LoanParameters {
            principal,
            annual_rate_percent,
            tenure_months,
            extra_monthly_payment: Decimal::ZERO,
            loan_type: None,
            include_schedule: false,
        }
    }

    pub fn with_extra(mut self, extra_monthly_payment: Money) -> Self {
        self.extra_monthly_payment = extra_monthly_payment;
        self
    }
}

pub(crate) fn validate_params(params: &LoanParameters) -> SarvasvaResult<()> {
    if params.principal <= Decimal::ZERO {
        return Err(SarvasvaError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if params.annual_rate_percent < Decimal::ZERO {
        return Err(SarvasvaError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if params.tenure_months < 1 {
        return Err(SarvasvaError::InvalidInput {
            field: "tenure_months".into(),
            reason: "Tenure must be at least one month".into(),
        });
    }
    if params.extra_monthly_payment < Decimal::ZERO {
        return Err(SarvasvaError::InvalidInput {
            field: "extra_monthly_payment".into(),
            reason: "Extra monthly payment cannot be negative".into(),
        });
    }
    Ok(())
}
