use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_sanction_core::applicant::purpose::LoanPurpose;
use loan_sanction_core::applicant::validation::{self, ApplicantInput};

use crate::input;

/// Arguments for applicant validation
#[derive(Args)]
pub struct ApplicantArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Mobile number; non-digits and a country code prefix are dropped
    #[arg(long, alias = "phone")]
    pub mobile: Option<String>,

    /// E-mail address
    #[arg(long)]
    pub email: Option<String>,

    /// PAN, e.g. ABCDE1234F
    #[arg(long)]
    pub pan: Option<String>,

    /// Purpose of the loan, e.g. "Home Renovation"
    #[arg(long)]
    pub purpose: Option<LoanPurpose>,

    /// Monthly income
    #[arg(long, alias = "salary")]
    pub monthly_income: Option<Decimal>,

    /// Terms accepted and credit check authorized
    #[arg(long)]
    pub consent: bool,
}

fn applicant_from(data: Option<Value>, args: ApplicantArgs) -> Result<ApplicantInput, Box<dyn std::error::Error>> {
    if let Some(data) = data {
        return Ok(serde_json::from_value(data)?);
    }

    Ok(ApplicantInput {
        name: args.name.unwrap_or_default(),
        mobile: args.mobile.unwrap_or_default(),
        email: args.email.unwrap_or_default(),
        pan: args.pan.unwrap_or_default(),
        purpose: args.purpose.unwrap_or_default(),
        monthly_income: args.monthly_income,
        consent: args.consent,
    })
}

pub fn run_applicant(args: ApplicantArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let data = input::read_json_input(args.input.as_deref())?;
    let applicant_input = applicant_from(data, args)?;
    let applicant = validation::validate_applicant(&applicant_input)?;
    Ok(serde_json::to_value(applicant)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ApplicantArgs {
        ApplicantArgs {
            input: None,
            name: Some("Asha Verma".into()),
            mobile: Some("98765 43210".into()),
            email: Some("asha@example.in".into()),
            pan: None,
            purpose: Some(LoanPurpose::Travel),
            monthly_income: None,
            consent: true,
        }
    }

    #[test]
    fn test_flags_build_input() {
        let input = applicant_from(None, args()).unwrap();
        assert_eq!(input.purpose, LoanPurpose::Travel);
        assert!(input.pan.is_empty());
        assert!(validation::validate_applicant(&input).is_ok());
    }

    #[test]
    fn test_json_input_defaults_missing_fields() {
        let data = serde_json::json!({ "name": "Asha" });
        let input = applicant_from(Some(data), args()).unwrap();
        assert_eq!(input.name, "Asha");
        assert!(!input.consent);
    }
}
