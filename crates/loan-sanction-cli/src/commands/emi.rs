use clap::Args;
use serde_json::Value;
use tracing::debug;

use loan_sanction_core::emi::quote::{self, LoanRequest};
use loan_sanction_core::emi::schedule;

use crate::input;

/// Loan terms, given as flags or as JSON
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount, e.g. 200000 or 2,00,000
    #[arg(long, alias = "amount")]
    pub principal: Option<String>,

    /// Annual interest rate in percent, e.g. 12.75
    #[arg(long, alias = "roi")]
    pub rate: Option<String>,

    /// Tenure in months
    #[arg(long, alias = "months")]
    pub tenure: Option<String>,
}

pub type EmiArgs = LoanArgs;
pub type ScheduleArgs = LoanArgs;

fn loan_request(args: &LoanArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    let data = input::read_json_input(args.input.as_deref())?;
    request_from(data, args)
}

/// JSON input wins over flags.
fn request_from(data: Option<Value>, args: &LoanArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    if let Some(data) = data {
        let request: LoanRequest = serde_json::from_value(data)?;
        return Ok(request);
    }

    let principal = args
        .principal
        .as_deref()
        .ok_or("--principal is required (or provide --input)")?;
    let rate = args
        .rate
        .as_deref()
        .ok_or("--rate is required (or provide --input)")?;
    let tenure = args
        .tenure
        .as_deref()
        .ok_or("--tenure is required (or provide --input)")?;

    Ok(LoanRequest::parse(principal, rate, tenure)?)
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = loan_request(&args)?;
    emi_value(&request)
}

fn emi_value(request: &LoanRequest) -> Result<Value, Box<dyn std::error::Error>> {
    debug!(?request, "quoting EMI");
    let result = quote::compute_quote_output(request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = loan_request(&args)?;
    let result = schedule::build_amortization_schedule(&request)?;
    Ok(serde_json::to_value(result)?)
}
