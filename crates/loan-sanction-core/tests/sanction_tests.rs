use chrono::NaiveDate;
use loan_sanction_core::applicant::purpose::LoanPurpose;
use loan_sanction_core::applicant::validation::ApplicantInput;
use loan_sanction_core::sanction::letter::{build_sanction_letter, SanctionInput};
use loan_sanction_core::{LoanError, LoanProductConfig, LoanRequest};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn form_input() -> serde_json::Value {
    serde_json::json!({
        "applicant": {
            "name": " Rahul Sharma ",
            "mobile": "+91 98765 43210",
            "email": "rahul@example.com",
            "pan": "abcde1234f",
            "purpose": "Debt Consolidation",
            "monthly_income": "65000",
            "consent": true
        },
        "loan": {
            "principal": "500000",
            "annual_rate_percent": "10.5",
            "tenure_months": 60
        },
        "issued_on": "2025-12-01"
    })
}

#[test]
fn test_letter_from_json_form() {
    let input: SanctionInput = serde_json::from_value(form_input()).unwrap();
    let out = build_sanction_letter(&input, &LoanProductConfig::default()).unwrap();
    let letter = &out.result;

    assert_eq!(letter.applicant.name, "Rahul Sharma");
    assert_eq!(letter.applicant.mobile, "9876543210");
    assert_eq!(letter.applicant.purpose, LoanPurpose::DebtConsolidation);
    assert_eq!(letter.quote.monthly_installment, dec!(10746.95));
    assert_eq!(letter.fees.net_disbursed, dec!(498231));
    assert_eq!(letter.issued_on_display, "01 December 2025");
    assert_eq!(
        letter.qr_payload,
        "CAPFIN|Applicant:Rahul Sharma|Mobile:9876543210|Loan:₹500,000|Tenure:60m|EMI:₹10,747"
    );
    assert!(letter
        .share_link
        .starts_with("https://wa.me/?text=Hello%2C+I+%28Rahul+Sharma%29"));
    assert!(out.warnings.is_empty());
}

#[test]
fn test_custom_lender_config() {
    let config = LoanProductConfig {
        lender_name: "Acme Loans".into(),
        letter_title: "ACME - APPROVAL".into(),
        qr_prefix: "ACME".into(),
        processing_fee_base: dec!(999),
        gst_rate: dec!(0.18),
        ..Default::default()
    };
    let input: SanctionInput = serde_json::from_value(form_input()).unwrap();
    let letter = build_sanction_letter(&input, &config).unwrap().result;

    assert_eq!(letter.title, "ACME - APPROVAL");
    assert!(letter.qr_payload.starts_with("ACME|"));
    // 999 + round(179.82) = 1179
    assert_eq!(letter.fees.total_fee, dec!(1179));
    assert_eq!(letter.signatory, "Authorized Signatory, Acme Loans");
}

#[test]
fn test_incomplete_form_lists_every_field() {
    let input = SanctionInput {
        applicant: ApplicantInput {
            name: "".into(),
            mobile: "12345".into(),
            email: "rahul@example.com".into(),
            consent: false,
            ..Default::default()
        },
        loan: LoanRequest::new(dec!(100000), dec!(10), 12).unwrap(),
        credit_score: None,
        issued_on: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    };
    let err = build_sanction_letter(&input, &LoanProductConfig::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Applicant rejected: please fix Full Name, Mobile (10 digits), Accept Terms & Conditions"
    );
}

#[test]
fn test_invalid_loan_in_letter_rejected() {
    let mut value = form_input();
    value["loan"]["tenure_months"] = serde_json::json!(0);
    let input: SanctionInput = serde_json::from_value(value).unwrap();
    match build_sanction_letter(&input, &LoanProductConfig::default()) {
        Err(LoanError::InvalidInput { field, .. }) => assert_eq!(field, "tenure_months"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}
