use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::types::{Money, Rate};
use crate::LoanResult;

#[cfg(feature = "emi")]
use crate::emi::quote::LoanRequest;

/// Lender-level product settings. Every field has a default so partial
/// configuration files are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanProductConfig {
    pub lender_name: String,
    pub letter_title: String,
    /// Leading tag of the QR payload
    pub qr_prefix: String,
    pub processing_fee_base: Money,
    /// GST charged on the processing fee, as a fraction
    pub gst_rate: Rate,
    pub min_principal: Money,
    pub max_principal: Money,
    pub min_rate_percent: Rate,
    pub max_rate_percent: Rate,
    pub tenure_options: Vec<u32>,
}

impl Default for LoanProductConfig {
    fn default() -> Self {
        LoanProductConfig {
            lender_name: "Capital Finance".into(),
            letter_title: "CAPITAL FINANCE - LOAN APPROVAL LETTER".into(),
            qr_prefix: "CAPFIN".into(),
            processing_fee_base: dec!(1499),
            gst_rate: dec!(0.18),
            min_principal: dec!(50000),
            max_principal: dec!(5000000),
            min_rate_percent: dec!(5),
            max_rate_percent: dec!(25),
            tenure_options: vec![12, 24, 36, 48, 60, 72, 84],
        }
    }
}

impl LoanProductConfig {
    /// Reject settings that no request could satisfy.
    pub fn validate(&self) -> LoanResult<()> {
        if self.processing_fee_base < Decimal::ZERO {
            return Err(LoanError::Config(
                "processing_fee_base must not be negative".into(),
            ));
        }
        if self.gst_rate < Decimal::ZERO {
            return Err(LoanError::Config("gst_rate must not be negative".into()));
        }
        if self.min_principal <= Decimal::ZERO || self.min_principal > self.max_principal {
            return Err(LoanError::Config(format!(
                "principal range {}..{} is empty or non-positive",
                self.min_principal, self.max_principal
            )));
        }
        if self.min_rate_percent < Decimal::ZERO || self.min_rate_percent > self.max_rate_percent {
            return Err(LoanError::Config(format!(
                "rate range {}..{} is empty or negative",
                self.min_rate_percent, self.max_rate_percent
            )));
        }
        if self.tenure_options.is_empty() {
            return Err(LoanError::Config("tenure_options must not be empty".into()));
        }
        if self.tenure_options.contains(&0) {
            return Err(LoanError::Config("tenure_options must be positive".into()));
        }
        Ok(())
    }

    /// Product-limit findings for a request. These are warnings: the EMI
    /// engine accepts any request that passes its own validation.
    #[cfg(feature = "emi")]
    pub fn check_request(&self, request: &LoanRequest) -> Vec<String> {
        let mut warnings = Vec::new();

        if request.principal < self.min_principal || request.principal > self.max_principal {
            warnings.push(format!(
                "Loan amount {} is outside the product range {} to {}",
                request.principal, self.min_principal, self.max_principal
            ));
        }
        if request.annual_rate_percent < self.min_rate_percent
            || request.annual_rate_percent > self.max_rate_percent
        {
            warnings.push(format!(
                "Rate {}% is outside the product range {}% to {}%",
                request.annual_rate_percent, self.min_rate_percent, self.max_rate_percent
            ));
        }
        if !self.tenure_options.contains(&request.tenure_months) {
            warnings.push(format!(
                "Tenure of {} months is not one of the offered tenures {:?}",
                request.tenure_months, self.tenure_options
            ));
        }

        warnings
    }
}
