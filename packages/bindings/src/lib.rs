use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde::Serialize;

use sarvasva_core::SarvasvaResult;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse the JSON input, run the calculation and serialise its output.
fn call_json<I, O>(input_json: &str, f: impl FnOnce(&I) -> SarvasvaResult<O>) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = f(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// EMI
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    call_json(&input_json, sarvasva_core::emi::amortization::calculate_emi)
}

#[napi]
pub fn accelerated_payoff(input_json: String) -> NapiResult<String> {
    call_json(
        &input_json,
        sarvasva_core::emi::accelerated::simulate_accelerated_payoff,
    )
}

#[napi]
pub fn stress_test_emi(input_json: String) -> NapiResult<String> {
    call_json(&input_json, sarvasva_core::emi::stress::stress_test_emi)
}

#[napi]
pub fn emi_affordability(input_json: String) -> NapiResult<String> {
    call_json(&input_json, sarvasva_core::emi::stress::assess_affordability)
}

// ---------------------------------------------------------------------------
// Prepayment & eligibility
// ---------------------------------------------------------------------------

#[napi]
pub fn prepayment_charges(input_json: String) -> NapiResult<String> {
    call_json(
        &input_json,
        sarvasva_core::prepayment::charges::assess_prepayment_charges,
    )
}

#[napi]
pub fn loan_eligibility(input_json: String) -> NapiResult<String> {
    call_json(&input_json, sarvasva_core::eligibility::foir::estimate_eligibility)
}

// ---------------------------------------------------------------------------
// Comparison & catalogue
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_lenders(input_json: String) -> NapiResult<String> {
    call_json(&input_json, sarvasva_core::comparison::lenders::compare_lenders)
}

#[napi]
pub fn loan_products() -> NapiResult<String> {
    serde_json::to_string(&sarvasva_core::products::catalogue()).map_err(to_napi_error)
}
