use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LoanProductConfig;
use crate::error::LoanError;
use crate::time_value::round_whole;
use crate::types::{Money, Rate};
use crate::LoanResult;

/// Upfront charges and the amount actually paid out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub base_fee: Money,
    pub gst: Money,
    pub total_fee: Money,
    pub net_disbursed: Money,
}

/// Base fee plus GST, the GST rounded half-up to whole currency units.
pub fn processing_fee(base_fee: Money, gst_rate: Rate) -> LoanResult<Money> {
    base_fee
        .checked_mul(gst_rate)
        .map(round_whole)
        .and_then(|gst| base_fee.checked_add(gst))
        .ok_or_else(|| {
            LoanError::Config(format!(
                "processing fee {base_fee} with GST rate {gst_rate} is out of range"
            ))
        })
}

/// Principal less fees, floored at zero.
pub fn net_disbursed(principal: Money, total_fee: Money) -> Money {
    (principal - total_fee).max(Decimal::ZERO)
}

pub fn fee_breakdown(principal: Money, config: &LoanProductConfig) -> LoanResult<FeeBreakdown> {
    if principal <= Decimal::ZERO {
        return Err(LoanError::invalid(
            "principal",
            "Loan amount must be positive",
        ));
    }

    let total_fee = processing_fee(config.processing_fee_base, config.gst_rate)?;
    let gst = total_fee - config.processing_fee_base;

    Ok(FeeBreakdown {
        base_fee: config.processing_fee_base,
        gst,
        total_fee,
        net_disbursed: net_disbursed(principal, total_fee),
    })
}
