use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::emi::quote::LoanRequest;
use crate::time_value::{monthly_rate, round_currency};
use crate::types::*;
use crate::LoanResult;

/// A single month of the repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: Money,
    pub installment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub monthly_installment: Money,
    pub rows: Vec<AmortizationRow>,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_paid: Money,
}

/// Month-by-month reducing-balance schedule at the quoted (rounded) EMI.
///
/// Interest is charged on the opening balance and rounded to currency
/// precision each month. The last installment settles the exact remaining
/// balance, so it may differ from the EMI by the accumulated rounding.
pub fn build_amortization_schedule(
    request: &LoanRequest,
) -> LoanResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let quote = request.quote()?;
    let emi = quote.monthly_installment;
    let r = monthly_rate(request.annual_rate_percent);

    let mut rows = Vec::with_capacity(request.tenure_months as usize);
    let mut balance = request.principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;

    for month in 1..=request.tenure_months {
        let opening = balance;
        let interest = round_currency(opening * r);

        let principal = if month == request.tenure_months {
            opening
        } else {
            (emi - interest).max(Decimal::ZERO).min(opening)
        };

        balance -= principal;
        total_interest += interest;
        total_principal += principal;

        rows.push(AmortizationRow {
            month,
            opening_balance: opening,
            installment: interest + principal,
            interest,
            principal,
            closing_balance: balance,
        });
    }

    if let Some(last) = rows.last() {
        if last.installment != emi {
            warnings.push(format!(
                "Final installment of {} absorbs rounding against the EMI of {}",
                last.installment, emi
            ));
        }
    }

    debug!(
        tenure_months = request.tenure_months,
        %total_interest,
        "built amortization schedule"
    );

    let output = AmortizationSchedule {
        monthly_installment: emi,
        rows,
        total_interest,
        total_principal,
        total_paid: total_interest + total_principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Reducing-balance amortization schedule",
        &serde_json::json!({
            "principal": request.principal.to_string(),
            "annual_rate_percent": request.annual_rate_percent.to_string(),
            "tenure_months": request.tenure_months,
            "monthly_installment": emi.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
