use rust_decimal::Decimal;
use url::Url;

use crate::applicant::validation::Applicant;
use crate::emi::quote::LoanQuote;
use crate::error::LoanError;
use crate::time_value::round_whole;
use crate::types::Money;
use crate::LoanResult;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Whole rupees with thousands separators: 105499.08 prints as `₹105,499`.
pub fn format_rupees(amount: Money) -> String {
    let whole = round_whole(amount);
    let sign = if whole < Decimal::ZERO { "-" } else { "" };
    format!("{sign}₹{}", group_thousands(&whole.abs().trunc().to_string()))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Short pipe-separated summary encoded into the letter's QR code.
pub fn qr_payload(prefix: &str, applicant: &Applicant, quote: &LoanQuote) -> String {
    format!(
        "{prefix}|Applicant:{}|Mobile:{}|Loan:{}|Tenure:{}m|EMI:{}",
        applicant.name,
        applicant.mobile,
        format_rupees(quote.principal),
        quote.tenure_months,
        format_rupees(quote.monthly_installment),
    )
}

pub fn share_message(applicant: &Applicant, quote: &LoanQuote) -> String {
    format!(
        "Hello, I ({}) have been provisionally sanctioned a loan of {} for '{}' with EMI {}/month for {} months.",
        applicant.name,
        format_rupees(quote.principal),
        applicant.purpose,
        format_rupees(quote.monthly_installment),
        quote.tenure_months,
    )
}

/// wa.me link carrying `message`; addressed to `phone` when it has digits.
pub fn whatsapp_link(message: &str, phone: &str) -> LoanResult<String> {
    let mut url = Url::parse(WHATSAPP_BASE).map_err(|e| LoanError::Serialization(e.to_string()))?;

    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if !digits.is_empty() {
        url.set_path(&digits);
    }
    url.query_pairs_mut().append_pair("text", message);

    Ok(url.to_string())
}
