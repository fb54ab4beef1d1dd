use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::Instant;
use tracing::debug;

use crate::applicant::validation::{validate_applicant, Applicant, ApplicantInput};
use crate::config::LoanProductConfig;
use crate::emi::quote::{LoanQuote, LoanRequest};
use crate::error::LoanError;
use crate::sanction::fees::{fee_breakdown, FeeBreakdown};
use crate::sanction::share::{format_rupees, qr_payload, share_message, whatsapp_link};
use crate::types::*;
use crate::LoanResult;

const SUBTITLE: &str = "PERSONAL LOAN SANCTION LETTER (PROVISIONAL)";
const PROVISIONAL_NOTE: &str = "This sanction letter is provisional and subject to verification of \
    documents, KYC, credit underwriting and execution of loan documentation. Final terms will be \
    as per the loan agreement.";
const MAX_CREDIT_SCORE: Decimal = dec!(100);

/// Everything needed to issue a provisional sanction letter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanctionInput {
    pub applicant: ApplicantInput,
    pub loan: LoanRequest,
    /// Externally supplied score on a 0-100 scale, printed as given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<Decimal>,
    pub issued_on: NaiveDate,
}

/// One label/value line of the letter's loan-detail table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanctionLetter {
    pub lender_name: String,
    pub title: String,
    pub subtitle: String,
    pub issued_on: NaiveDate,
    pub issued_on_display: String,
    pub applicant: Applicant,
    pub quote: LoanQuote,
    pub fees: FeeBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<Decimal>,
    pub details: Vec<LetterRow>,
    pub note: String,
    pub signatory: String,
    pub qr_payload: String,
    pub share_message: String,
    pub share_link: String,
}

fn row(label: &str, value: String) -> LetterRow {
    LetterRow {
        label: label.to_string(),
        value,
    }
}

/// Validate the applicant, price the loan and assemble the letter contents.
///
/// Applicant problems are reported all at once. Product-limit breaches and a
/// malformed PAN become warnings rather than errors.
pub fn build_sanction_letter(
    input: &SanctionInput,
    config: &LoanProductConfig,
) -> LoanResult<ComputationOutput<SanctionLetter>> {
    let start = Instant::now();

    if let Some(score) = input.credit_score {
        if score < Decimal::ZERO || score > MAX_CREDIT_SCORE {
            return Err(LoanError::invalid(
                "credit_score",
                "Credit score must be between 0 and 100",
            ));
        }
    }

    let applicant = validate_applicant(&input.applicant)?;
    let quote = input.loan.quote()?;
    let fees = fee_breakdown(quote.principal, config)?;

    let mut warnings = config.check_request(&input.loan);
    if !applicant.pan_valid {
        warnings.push(format!(
            "PAN '{}' does not match the format ABCDE1234F",
            applicant.pan
        ));
    }
    if fees.net_disbursed.is_zero() {
        warnings.push("Processing fee consumes the entire loan amount".into());
    }

    let mut details = vec![
        row("Loan Amount Sanctioned", format_rupees(quote.principal)),
        row(
            "Rate of Interest (Reducing)",
            format!("{}% p.a.", quote.annual_rate_percent.normalize()),
        ),
        row("Loan Tenure", format!("{} Months", quote.tenure_months)),
        row("Estimated Monthly EMI", format_rupees(quote.monthly_installment)),
        row("Processing Fee + GST", format_rupees(fees.total_fee)),
        row("Net Amount to be Disbursed", format_rupees(fees.net_disbursed)),
    ];
    if let Some(score) = input.credit_score {
        details.push(row("Credit Risk Score (0-100)", score.to_string()));
    }

    let letter = SanctionLetter {
        lender_name: config.lender_name.clone(),
        title: config.letter_title.clone(),
        subtitle: SUBTITLE.to_string(),
        issued_on: input.issued_on,
        issued_on_display: input.issued_on.format("%d %B %Y").to_string(),
        qr_payload: qr_payload(&config.qr_prefix, &applicant, &quote),
        share_message: share_message(&applicant, &quote),
        // recipient is chosen in WhatsApp, not fixed to the applicant
        share_link: whatsapp_link(&share_message(&applicant, &quote), "")?,
        signatory: format!("Authorized Signatory, {}", config.lender_name),
        note: PROVISIONAL_NOTE.to_string(),
        credit_score: input.credit_score,
        details,
        applicant,
        quote,
        fees,
    };

    debug!(
        applicant = %letter.applicant.name,
        warnings = warnings.len(),
        "assembled sanction letter"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Provisional sanction letter",
        &serde_json::json!({
            "lender": config.lender_name,
            "processing_fee_base": config.processing_fee_base.to_string(),
            "gst_rate": config.gst_rate.to_string(),
            "issued_on": input.issued_on.to_string(),
        }),
        warnings,
        elapsed,
        letter,
    ))
}

impl SanctionLetter {
    /// Plain-text rendering for terminals and e-mail bodies.
    pub fn render_text(&self) -> String {
        let width = self
            .details
            .iter()
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", self.subtitle);
        let _ = writeln!(out);
        let _ = writeln!(out, "Date: {}", self.issued_on_display);
        let _ = writeln!(out, "Applicant: {}", self.applicant.name);
        let _ = writeln!(
            out,
            "Mobile: {}  |  Email: {}",
            self.applicant.mobile, self.applicant.email
        );
        let pan = if self.applicant.pan.is_empty() {
            "N/A"
        } else {
            self.applicant.pan.as_str()
        };
        let _ = writeln!(out, "PAN: {pan}");
        let _ = writeln!(out, "Purpose: {}", self.applicant.purpose);
        let _ = writeln!(out);
        for r in &self.details {
            let _ = writeln!(out, "{:<width$}  {}", r.label, r.value);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.note);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.signatory);
        let _ = writeln!(out, "QR: {}", self.qr_payload);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::purpose::LoanPurpose;

    fn sample_input() -> SanctionInput {
        SanctionInput {
            applicant: ApplicantInput {
                name: "Asha Verma".into(),
                mobile: "9876543210".into(),
                email: "asha@example.in".into(),
                pan: "ABCDE1234F".into(),
                purpose: LoanPurpose::HomeRenovation,
                monthly_income: Some(dec!(60000)),
                consent: true,
            },
            loan: LoanRequest::new(dec!(200000), dec!(12.75), 24).unwrap(),
            credit_score: None,
            issued_on: NaiveDate::from_ymd_opt(2025, 12, 5).unwrap(),
        }
    }

    #[test]
    fn test_letter_rows() {
        let out = build_sanction_letter(&sample_input(), &LoanProductConfig::default()).unwrap();
        let letter = &out.result;

        let values: Vec<&str> = letter.details.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(
            values,
            vec!["₹200,000", "12.75% p.a.", "24 Months", "₹9,485", "₹1,769", "₹198,231"]
        );
        assert_eq!(letter.issued_on_display, "05 December 2025");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_credit_score_row_only_when_supplied() {
        let mut input = sample_input();
        input.credit_score = Some(dec!(74.0));
        let out = build_sanction_letter(&input, &LoanProductConfig::default()).unwrap();
        let last = out.result.details.last().unwrap();
        assert_eq!(last.label, "Credit Risk Score (0-100)");
        assert_eq!(last.value, "74.0");
    }

    #[test]
    fn test_share_link_has_no_recipient() {
        let out = build_sanction_letter(&sample_input(), &LoanProductConfig::default()).unwrap();
        let link = &out.result.share_link;
        assert!(link.starts_with("https://wa.me/?text=Hello%2C+I+%28Asha+Verma%29"));
        assert!(!link.contains("9876543210?"));
    }

    #[test]
    fn test_credit_score_out_of_range() {
        let mut input = sample_input();
        input.credit_score = Some(dec!(101));
        let err = build_sanction_letter(&input, &LoanProductConfig::default()).unwrap_err();
        assert_eq!(err.field(), Some("credit_score"));
    }

    #[test]
    fn test_bad_pan_and_limits_are_warnings() {
        let mut input = sample_input();
        input.applicant.pan = "XYZ".into();
        input.loan = LoanRequest::new(dec!(10000), dec!(12.75), 24).unwrap();
        let out = build_sanction_letter(&input, &LoanProductConfig::default()).unwrap();
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn test_rejected_applicant_propagates() {
        let mut input = sample_input();
        input.applicant.consent = false;
        let err = build_sanction_letter(&input, &LoanProductConfig::default()).unwrap_err();
        assert!(matches!(err, LoanError::ApplicantRejected { .. }));
    }

    #[test]
    fn test_render_text_contains_rows() {
        let out = build_sanction_letter(&sample_input(), &LoanProductConfig::default()).unwrap();
        let text = out.result.render_text();
        assert!(text.starts_with("CAPITAL FINANCE - LOAN APPROVAL LETTER\n"));
        assert!(text.contains("Estimated Monthly EMI"));
        assert!(text.contains("₹9,485"));
        assert!(text.contains("Authorized Signatory, Capital Finance"));
    }
}
