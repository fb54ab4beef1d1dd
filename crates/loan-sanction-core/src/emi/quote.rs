use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::LoanError;
use crate::time_value::{level_payment, monthly_rate, round_currency};
use crate::types::*;
use crate::LoanResult;

/// Longest accepted tenure: 100 years of monthly installments.
pub const MAX_TENURE_MONTHS: u32 = 1200;

/// A loan as requested by the applicant. Validated again on every
/// computation, so a deserialized value cannot bypass the checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub principal: Money,
    /// Annual rate as a percentage (10 = 10% p.a.)
    pub annual_rate_percent: Rate,
    pub tenure_months: u32,
}

/// EMI and derived totals, every amount rounded to currency precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub principal: Money,
    pub annual_rate_percent: Rate,
    pub tenure_months: u32,
    pub monthly_installment: Money,
    pub total_payable: Money,
    pub total_interest: Money,
}

impl LoanRequest {
    pub fn new(principal: Money, annual_rate_percent: Rate, tenure_months: u32) -> LoanResult<Self> {
        let request = LoanRequest {
            principal,
            annual_rate_percent,
            tenure_months,
        };
        request.validate()?;
        Ok(request)
    }

    /// Build a request from untrusted text, e.g. form fields or CLI flags.
    ///
    /// Whitespace is trimmed and `,` / `_` digit separators are ignored, so
    /// `"1,00,000"` and `"100_000"` both read as 100000.
    pub fn parse(principal: &str, annual_rate_percent: &str, tenure_months: &str) -> LoanResult<Self> {
        let principal = parse_decimal("principal", principal)?;
        let rate = parse_decimal("annual_rate_percent", annual_rate_percent)?;
        let tenure = parse_tenure(tenure_months)?;
        LoanRequest::new(principal, rate, tenure)
    }

    pub fn validate(&self) -> LoanResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(LoanError::invalid(
                "principal",
                "Loan amount must be positive",
            ));
        }
        if self.tenure_months == 0 {
            return Err(LoanError::invalid(
                "tenure_months",
                "Tenure must be at least 1 month",
            ));
        }
        if self.tenure_months > MAX_TENURE_MONTHS {
            return Err(LoanError::invalid(
                "tenure_months",
                format!("Tenure cannot exceed {MAX_TENURE_MONTHS} months"),
            ));
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(LoanError::invalid(
                "annual_rate_percent",
                "Interest rate cannot be negative",
            ));
        }
        Ok(())
    }

    pub fn quote(&self) -> LoanResult<LoanQuote> {
        compute_quote(self.principal, self.annual_rate_percent, self.tenure_months)
    }
}

fn clean_number(text: &str) -> String {
    text.trim().chars().filter(|c| *c != ',' && *c != '_').collect()
}

fn parse_decimal(field: &str, text: &str) -> LoanResult<Decimal> {
    let cleaned = clean_number(text);
    if cleaned.is_empty() {
        return Err(LoanError::invalid(field, "A value is required"));
    }
    Decimal::from_str(&cleaned)
        .map_err(|_| LoanError::invalid(field, format!("'{}' is not a number", text.trim())))
}

fn parse_tenure(text: &str) -> LoanResult<u32> {
    let value = parse_decimal("tenure_months", text)?;
    if !value.fract().is_zero() {
        return Err(LoanError::invalid(
            "tenure_months",
            format!("'{}' is not a whole number of months", text.trim()),
        ));
    }
    if value <= Decimal::ZERO {
        return Err(LoanError::invalid(
            "tenure_months",
            "Tenure must be at least 1 month",
        ));
    }
    value.to_u32().ok_or_else(|| {
        LoanError::invalid("tenure_months", format!("{value} months is out of range"))
    })
}

/// Equated monthly installment under reducing-balance amortization.
///
/// `emi = P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r` the monthly rate;
/// at `r = 0` the principal is split evenly. The installment is rounded
/// half-up to 2 dp, and the totals are derived from the rounded figure.
pub fn compute_quote(
    principal: Money,
    annual_rate_percent: Rate,
    tenure_months: u32,
) -> LoanResult<LoanQuote> {
    let request = LoanRequest {
        principal,
        annual_rate_percent,
        tenure_months,
    };
    if let Err(e) = request.validate() {
        warn!(error = %e, "rejected loan request");
        return Err(e);
    }

    let r = monthly_rate(annual_rate_percent);
    let monthly_installment = round_currency(level_payment(principal, r, tenure_months)?);
    if monthly_installment.is_zero() {
        return Err(LoanError::invalid(
            "principal",
            format!("Loan amount {principal} is too small to amortize over {tenure_months} months"),
        ));
    }
    let total_payable = monthly_installment
        .checked_mul(Decimal::from(tenure_months))
        .map(round_currency)
        .ok_or_else(|| LoanError::invalid("principal", "total payable exceeds decimal range"))?;
    let total_interest = round_currency(total_payable - principal);

    debug!(
        %principal,
        %annual_rate_percent,
        tenure_months,
        %monthly_installment,
        "computed loan quote"
    );

    Ok(LoanQuote {
        principal,
        annual_rate_percent,
        tenure_months,
        monthly_installment,
        total_payable,
        total_interest,
    })
}

/// Quote wrapped in the standard output envelope.
pub fn compute_quote_output(request: &LoanRequest) -> LoanResult<ComputationOutput<LoanQuote>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let quote = request.quote()?;

    if request.annual_rate_percent.is_zero() {
        warnings.push("Interest-free loan: principal split evenly across the tenure".into());
    }
    if quote.total_interest < Decimal::ZERO {
        warnings.push(format!(
            "Rounding residual: installments total {} against principal {}",
            quote.total_payable, quote.principal
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Reducing-balance EMI",
        &serde_json::json!({
            "principal": request.principal.to_string(),
            "annual_rate_percent": request.annual_rate_percent.to_string(),
            "monthly_rate": monthly_rate(request.annual_rate_percent).to_string(),
            "tenure_months": request.tenure_months,
        }),
        warnings,
        elapsed,
        quote,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_quote() {
        let q = compute_quote(dec!(100000), dec!(10), 12).unwrap();
        assert_eq!(q.monthly_installment, dec!(8791.59));
        assert_eq!(q.total_payable, dec!(105499.08));
        assert_eq!(q.total_interest, dec!(5499.08));
    }

    #[test]
    fn test_zero_rate_quote_keeps_residual() {
        let q = compute_quote(dec!(500000), Decimal::ZERO, 24).unwrap();
        assert_eq!(q.monthly_installment, dec!(20833.33));
        assert_eq!(q.total_payable, dec!(499999.92));
        assert_eq!(q.total_interest, dec!(-0.08));
    }

    #[test]
    fn test_zero_principal_rejected() {
        let err = compute_quote(Decimal::ZERO, dec!(10), 12).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
    }

    #[test]
    fn test_zero_tenure_rejected() {
        let err = compute_quote(dec!(1000), dec!(10), 0).unwrap_err();
        assert_eq!(err.field(), Some("tenure_months"));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = compute_quote(dec!(1000), dec!(-1), 12).unwrap_err();
        assert_eq!(err.field(), Some("annual_rate_percent"));
    }

    #[test]
    fn test_tenure_cap() {
        assert!(compute_quote(dec!(1000), Decimal::ZERO, MAX_TENURE_MONTHS).is_ok());

        let err = compute_quote(dec!(1000), Decimal::ZERO, MAX_TENURE_MONTHS + 1).unwrap_err();
        assert_eq!(err.field(), Some("tenure_months"));

        let err = LoanRequest::new(dec!(1000), Decimal::ZERO, 4_000_000_000).unwrap_err();
        assert_eq!(err.field(), Some("tenure_months"));

        assert!(LoanRequest::parse("1000", "0", "1201").is_err());
    }

    #[test]
    fn test_installment_rounding_to_zero_rejected() {
        let err = compute_quote(dec!(1), Decimal::ZERO, 1000).unwrap_err();
        assert_eq!(err.field(), Some("principal"));

        let err = compute_quote(dec!(0.004), dec!(10), 12).unwrap_err();
        assert_eq!(err.field(), Some("principal"));

        // 0.005 per month rounds up to one paisa
        let q = compute_quote(dec!(0.06), Decimal::ZERO, 12).unwrap();
        assert_eq!(q.monthly_installment, dec!(0.01));
    }

    #[test]
    fn test_runaway_compounding_rejected() {
        // 1200% p.a. is 100% a month; 2^1000 does not fit a decimal
        let err = compute_quote(dec!(1000), dec!(1200), 1000).unwrap_err();
        assert_eq!(err.field(), Some("tenure_months"));
    }

    #[test]
    fn test_parse_accepts_separators() {
        let req = LoanRequest::parse(" 1,00,000 ", "10", "12").unwrap();
        assert_eq!(req.principal, dec!(100000));
        assert_eq!(req.tenure_months, 12);
    }

    #[test]
    fn test_parse_rejects_text() {
        let err = LoanRequest::parse("lots", "10", "12").unwrap_err();
        assert_eq!(err.field(), Some("principal"));

        let err = LoanRequest::parse("1000", "ten", "12").unwrap_err();
        assert_eq!(err.field(), Some("annual_rate_percent"));
    }

    #[test]
    fn test_parse_tenure_rules() {
        assert_eq!(LoanRequest::parse("1000", "10", "24.0").unwrap().tenure_months, 24);
        assert!(LoanRequest::parse("1000", "10", "12.5").is_err());
        assert!(LoanRequest::parse("1000", "10", "-3").is_err());
        assert!(LoanRequest::parse("1000", "10", "").is_err());
        assert!(LoanRequest::parse("1000", "10", "99999999999").is_err());
    }

    #[test]
    fn test_output_warns_on_residual() {
        let req = LoanRequest::new(dec!(500000), Decimal::ZERO, 24).unwrap();
        let out = compute_quote_output(&req).unwrap();
        assert_eq!(out.warnings.len(), 2);
        assert_eq!(out.methodology, "Reducing-balance EMI");
    }

    #[test]
    fn test_output_no_warnings_for_standard_loan() {
        let req = LoanRequest::new(dec!(100000), dec!(10), 12).unwrap();
        let out = compute_quote_output(&req).unwrap();
        assert!(out.warnings.is_empty());
        assert_eq!(out.result.monthly_installment, dec!(8791.59));
    }
}
