use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::info;

use loan_sanction_core::sanction::fees;
use loan_sanction_core::sanction::letter::{self, SanctionInput};
use loan_sanction_core::LoanProductConfig;

use crate::input;

/// Arguments for the processing fee breakdown
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FeesArgs {
    /// Loan amount
    #[arg(long, alias = "amount")]
    pub principal: Decimal,
}

/// Arguments for sanction letter assembly
#[derive(Args)]
pub struct SanctionArgs {
    /// Path to JSON input file with `applicant`, `loan` and optional
    /// `credit_score` / `issued_on`
    #[arg(long)]
    pub input: Option<String>,

    /// Letter date (YYYY-MM-DD); defaults to today when the input has none
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Print the letter as plain text instead of structured output
    #[arg(long)]
    pub text: bool,
}

pub fn run_fees(args: FeesArgs, config: &LoanProductConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let result = fees::fee_breakdown(args.principal, config)?;
    Ok(serde_json::to_value(result)?)
}

/// Fill in `issued_on` when the caller did not supply one.
fn with_issue_date(mut data: Value, date: NaiveDate) -> Result<Value, Box<dyn std::error::Error>> {
    let obj = data
        .as_object_mut()
        .ok_or("sanction input must be a JSON object")?;
    if !obj.contains_key("issued_on") {
        obj.insert("issued_on".into(), Value::String(date.to_string()));
    }
    Ok(data)
}

fn sanction_value(
    data: Value,
    date: NaiveDate,
    text: bool,
    config: &LoanProductConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let sanction_input: SanctionInput = serde_json::from_value(with_issue_date(data, date)?)?;
    let result = letter::build_sanction_letter(&sanction_input, config)?;

    info!(
        applicant = %result.result.applicant.name,
        warnings = result.warnings.len(),
        "sanction letter ready"
    );

    if text {
        return Ok(Value::String(result.result.render_text()));
    }
    Ok(serde_json::to_value(result)?)
}

pub fn run_sanction(args: SanctionArgs, config: &LoanProductConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let data = input::read_json_input(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for sanction letter")?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    sanction_value(data, date, args.text, config)
}
