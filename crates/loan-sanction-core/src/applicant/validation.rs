use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::applicant::purpose::LoanPurpose;
use crate::error::LoanError;
use crate::types::Money;
use crate::LoanResult;

static PAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("PAN pattern compiles"));

const MOBILE_DIGITS: usize = 10;

/// Applicant fields as typed into the application form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicantInput {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub pan: String,
    pub purpose: LoanPurpose,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<Money>,
    /// Terms accepted and credit check authorized
    pub consent: bool,
}

/// Cleaned applicant, safe to print on a letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub pan: String,
    pub pan_valid: bool,
    pub purpose: LoanPurpose,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<Money>,
}

/// Indian PAN: five letters, four digits, one letter (ABCDE1234F).
pub fn is_valid_pan(pan: &str) -> bool {
    PAN_PATTERN.is_match(&normalize_pan(pan))
}

pub fn normalize_pan(pan: &str) -> String {
    pan.trim().to_uppercase()
}

/// Digits only; a longer number (country code prefix) keeps its last ten.
pub fn clean_mobile(mobile: &str) -> String {
    let digits: String = mobile.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() > MOBILE_DIGITS {
        digits[digits.len() - MOBILE_DIGITS..].to_string()
    } else {
        digits
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((_, domain)) => domain.contains('.'),
        None => false,
    }
}

/// Check every applicant field and report all failures together.
///
/// The failing field labels are returned in form order inside
/// [`LoanError::ApplicantRejected`]. A malformed PAN does not reject the
/// application; it is flagged through `pan_valid`.
pub fn validate_applicant(input: &ApplicantInput) -> LoanResult<Applicant> {
    let name = input.name.trim().to_string();
    let mobile = clean_mobile(&input.mobile);
    let email = input.email.trim().to_string();
    let pan = normalize_pan(&input.pan);

    let mut failed: Vec<String> = Vec::new();

    if name.is_empty() {
        failed.push("Full Name".into());
    }
    if mobile.len() != MOBILE_DIGITS {
        failed.push("Mobile (10 digits)".into());
    }
    if !is_valid_email(&email) {
        failed.push("Valid Email".into());
    }
    if matches!(input.monthly_income, Some(income) if income < Decimal::ZERO) {
        failed.push("Monthly Income".into());
    }
    if !input.consent {
        failed.push("Accept Terms & Conditions".into());
    }

    if !failed.is_empty() {
        warn!(fields = ?failed, "applicant rejected");
        return Err(LoanError::ApplicantRejected { fields: failed });
    }

    let pan_valid = PAN_PATTERN.is_match(&pan);
    debug!(pan_valid, "applicant validated");

    Ok(Applicant {
        name,
        mobile,
        email,
        pan,
        pan_valid,
        purpose: input.purpose,
        monthly_income: input.monthly_income,
    })
}
