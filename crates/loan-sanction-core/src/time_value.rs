use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::LoanError;
use crate::types::{Money, Rate};
use crate::LoanResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Currency precision used for every quoted amount.
pub const CURRENCY_DP: u32 = 2;

/// Convert an annual percentage rate into a monthly fractional rate.
pub fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / MONTHS_PER_YEAR / PERCENT
}

/// (1 + r)^n using integer exponentiation.
pub fn compound_factor(rate: Rate, nper: u32) -> LoanResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| {
            LoanError::invalid(
                "tenure_months",
                format!("compounding over {nper} periods overflows decimal range"),
            )
        })
}

/// Level payment that amortizes `principal` over `nper` periods at `rate`
/// per period. Unrounded.
pub fn level_payment(principal: Money, rate: Rate, nper: u32) -> LoanResult<Money> {
    if nper == 0 {
        return Err(LoanError::invalid(
            "tenure_months",
            "Number of periods must be > 0",
        ));
    }

    let periods = Decimal::from(nper);
    if rate.is_zero() {
        return Ok(principal / periods);
    }

    let factor = compound_factor(rate, nper)?;
    let growth = factor - Decimal::ONE;

    // A rate too small to move the 28-digit factor behaves as interest-free.
    if growth.is_zero() {
        return Ok(principal / periods);
    }

    let annuity = rate
        .checked_mul(factor)
        .and_then(|v| v.checked_div(growth))
        .ok_or_else(|| {
            LoanError::invalid("annual_rate_percent", "rate compounding exceeds decimal range")
        })?;
    principal.checked_mul(annuity).ok_or_else(|| {
        LoanError::invalid("principal", "installment exceeds decimal range")
    })
}

/// Round to currency precision, half away from zero.
pub fn round_currency(value: Money) -> Money {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to whole currency units, half away from zero.
pub fn round_whole(value: Money) -> Money {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_compound_factor() {
        assert_eq!(compound_factor(dec!(0.01), 2).unwrap(), dec!(1.0201));
        assert_eq!(compound_factor(dec!(0.05), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_compound_factor_overflow() {
        let err = compound_factor(dec!(1), 200).unwrap_err();
        assert_eq!(err.field(), Some("tenure_months"));
    }

    #[test]
    fn test_level_payment_zero_rate() {
        let pmt = level_payment(dec!(1200), Decimal::ZERO, 12).unwrap();
        assert_eq!(pmt, dec!(100));
    }

    #[test]
    fn test_level_payment_single_period() {
        // One period: principal plus one period of interest
        let pmt = level_payment(dec!(1000), dec!(0.01), 1).unwrap();
        assert_eq!(round_currency(pmt), dec!(1010.00));
    }

    #[test]
    fn test_level_payment_zero_periods() {
        assert!(level_payment(dec!(1000), dec!(0.01), 0).is_err());
    }

    #[test]
    fn test_round_currency_half_up() {
        assert_eq!(round_currency(dec!(2.345)), dec!(2.35));
        assert_eq!(round_currency(dec!(2.355)), dec!(2.36));
        assert_eq!(round_currency(dec!(2.3449)), dec!(2.34));
        assert_eq!(round_currency(dec!(-0.085)), dec!(-0.09));
    }

    #[test]
    fn test_round_whole() {
        assert_eq!(round_whole(dec!(269.82)), dec!(270));
        assert_eq!(round_whole(dec!(8791.5)), dec!(8792));
    }
}
