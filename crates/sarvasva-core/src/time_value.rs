use rust_decimal::MathematicalOps;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::SarvasvaError;
use crate::types::{Money, Percent, Rate};
use crate::SarvasvaResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Monthly periodic rate from an annual percentage: 10.99 -> 0.0091583...
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / MONTHS_PER_YEAR / dec!(100)
}

/// (1 + r)^n, reporting overflow instead of panicking.
pub fn compound_factor(rate: Rate, nper: u32) -> SarvasvaResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| SarvasvaError::Overflow {
            context: format!("compounding {rate} over {nper} periods"),
        })
}

/// Level installment that amortises `principal` over `nper` periods at `rate`.
///
/// installment = P * r * (1+r)^n / ((1+r)^n - 1), or P / n when r = 0.
pub fn level_installment(principal: Money, rate: Rate, nper: u32) -> SarvasvaResult<Money> {
    if nper == 0 {
        return Err(SarvasvaError::InvalidInput {
            field: "tenure_months".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    if rate < Decimal::ZERO {
        return Err(SarvasvaError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = compound_factor(rate, nper)?;
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        return Err(SarvasvaError::DivisionByZero {
            context: "installment annuity factor".into(),
        });
    }

    let numerator = principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .ok_or_else(|| SarvasvaError::Overflow {
            context: "installment numerator".into(),
        })?;

    Ok(numerator / denom)
}

/// Principal that a level `installment` can service over `nper` periods at `rate`.
///
/// The inverse of [`level_installment`]: PV = I * ((1+r)^n - 1) / (r * (1+r)^n).
pub fn annuity_present_value(installment: Money, rate: Rate, nper: u32) -> SarvasvaResult<Money> {
    if installment.is_zero() || nper == 0 {
        return Ok(Decimal::ZERO);
    }
    if rate.is_zero() {
        return Ok(installment * Decimal::from(nper));
    }

    let factor = compound_factor(rate, nper)?;
    let denom = rate * factor;
    if denom.is_zero() {
        return Err(SarvasvaError::DivisionByZero {
            context: "annuity present value".into(),
        });
    }

    Ok(installment * (factor - Decimal::ONE) / denom)
}
