use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

use loan_sanction_core::LoanProductConfig;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Product settings from optional JSON, validated before use.
fn product_config(config_json: Option<String>) -> NapiResult<LoanProductConfig> {
    let config = match config_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => LoanProductConfig::default(),
    };
    config.validate().map_err(to_napi_error)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// EMI
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_quote(input_json: String) -> NapiResult<String> {
    let input: loan_sanction_core::emi::quote::LoanRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_sanction_core::emi::quote::compute_quote_output(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Quote from raw form text, e.g. `("2,00,000", "12.75", "24")`.
#[napi]
pub fn quote_from_form(principal: String, annual_rate_percent: String, tenure_months: String) -> NapiResult<String> {
    let request = loan_sanction_core::emi::quote::LoanRequest::parse(
        &principal,
        &annual_rate_percent,
        &tenure_months,
    )
    .map_err(to_napi_error)?;
    let output =
        loan_sanction_core::emi::quote::compute_quote_output(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: loan_sanction_core::emi::quote::LoanRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_sanction_core::emi::schedule::build_amortization_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Applicant
// ---------------------------------------------------------------------------

#[napi]
pub fn validate_applicant(input_json: String) -> NapiResult<String> {
    let input: loan_sanction_core::applicant::validation::ApplicantInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_sanction_core::applicant::validation::validate_applicant(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn is_valid_pan(pan: String) -> bool {
    loan_sanction_core::applicant::validation::is_valid_pan(&pan)
}

// ---------------------------------------------------------------------------
// Sanction
// ---------------------------------------------------------------------------

#[napi]
pub fn processing_fees(principal: String, config_json: Option<String>) -> NapiResult<String> {
    let principal = Decimal::from_str(principal.trim()).map_err(to_napi_error)?;
    let config = product_config(config_json)?;
    let output = loan_sanction_core::sanction::fees::fee_breakdown(principal, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn sanction_letter(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: loan_sanction_core::sanction::letter::SanctionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = product_config(config_json)?;
    let output = loan_sanction_core::sanction::letter::build_sanction_letter(&input, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn sanction_letter_text(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: loan_sanction_core::sanction::letter::SanctionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = product_config(config_json)?;
    let output = loan_sanction_core::sanction::letter::build_sanction_letter(&input, &config)
        .map_err(to_napi_error)?;
    Ok(output.result.render_text())
}
