use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::emi::amortization::compute_amortization;
use crate::emi::LoanParameters;
use crate::{SarvasvaError, SarvasvaResult, types::*};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderOffer {
    pub lender: String,
    pub annual_rate_percent: Percent,
    /// Upfront fee as a percentage of the principal.
    #[serde(default)]
    pub processing_fee_percent: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderComparisonInput {
    pub principal: Money,
    pub tenure_months: u32,
    pub offers: Vec<LenderOffer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderQuote {
    pub lender: String,
    pub annual_rate_percent: Percent,
    pub processing_fee_percent: Percent,
    pub installment: Money,
    pub total_interest: Money,
    pub processing_fee: Money,
    /// Interest plus processing fee.
    pub total_cost: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderComparison {
    pub quotes: Vec<LenderQuote>,
    pub cheapest_lender: String,
    /// Gap in total cost between the dearest and the cheapest offer.
    pub max_saving: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price one principal and tenure across several lenders' offers.
pub fn compare_lenders(
    input: &LenderComparisonInput,
) -> SarvasvaResult<ComputationOutput<LenderComparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.offers.is_empty() {
        return Err(SarvasvaError::InsufficientData(
            "At least one lender offer is required.".into(),
        ));
    }

    let mut quotes = Vec::with_capacity(input.offers.len());
    for offer in &input.offers {
        if offer.processing_fee_percent < Decimal::ZERO {
            return Err(SarvasvaError::InvalidInput {
                field: "processing_fee_percent".into(),
                reason: format!("Processing fee for {} cannot be negative", offer.lender),
            });
        }
        let amort = compute_amortization(&LoanParameters::new(
            input.principal,
            offer.annual_rate_percent,
            input.tenure_months,
        ))?;
        let fee = input.principal * offer.processing_fee_percent / dec!(100);
        quotes.push(LenderQuote {
            lender: offer.lender.clone(),
            annual_rate_percent: offer.annual_rate_percent,
            processing_fee_percent: offer.processing_fee_percent,
            installment: amort.installment,
            total_interest: amort.total_interest,
            processing_fee: fee,
            total_cost: amort.total_interest + fee,
        });
    }

    // Ties keep the first-listed lender.
    let cheapest = quotes
        .iter()
        .reduce(|best, q| if q.total_cost < best.total_cost { q } else { best })
        .ok_or_else(|| SarvasvaError::InsufficientData("No quotes produced.".into()))?;
    let dearest = quotes
        .iter()
        .map(|q| q.total_cost)
        .max()
        .unwrap_or(cheapest.total_cost);

    let lowest_rate = quotes.iter().map(|q| q.annual_rate_percent).min();
    if lowest_rate != Some(cheapest.annual_rate_percent) {
        warnings.push(format!(
            "{} is cheapest overall despite not offering the lowest rate; fees change the ranking.",
            cheapest.lender
        ));
    }

    let output = LenderComparison {
        cheapest_lender: cheapest.lender.clone(),
        max_saving: dearest - cheapest.total_cost,
        quotes,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "principal": input.principal.to_string(),
        "tenure_months": input.tenure_months,
        "cost_basis": "total interest plus processing fee",
    });

    Ok(with_metadata(
        "Lender comparison by total cost of borrowing",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
