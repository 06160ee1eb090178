use rust_decimal::{Decimal, MathematicalOps};
use thiserror::Error;

pub mod investment;
pub mod loan;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: Decimal },
    #[error("{name} cannot be negative, got {value}")]
    Negative { name: &'static str, value: Decimal },
    #[error("{name} must be greater than zero")]
    ZeroPeriod { name: &'static str },
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },
    #[error("Paid months ({paid}) cannot exceed the tenure ({tenure})")]
    PaidMonthsExceedTenure { paid: u32, tenure: u32 },
    #[error("EMI {emi} cannot be less than its interest component {interest}")]
    EmiBelowInterest { emi: Decimal, interest: Decimal },
    #[error("Expected one return per investment, got {investments} investments and {returns} returns")]
    LengthMismatch { investments: usize, returns: usize },
    #[error("At least one investment is required")]
    NoInvestments,
    #[error("Inflation rate must be below 100, got {0}")]
    InflationTooHigh(Decimal),
    #[error("Arithmetic overflow or division by zero while computing {0}")]
    Arithmetic(&'static str),
}

fn ensure_positive(name: &'static str, value: Decimal) -> Result<(), CalculationError> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(CalculationError::NotPositive { name, value })
    }
}

fn ensure_non_negative(name: &'static str, value: Decimal) -> Result<(), CalculationError> {
    if value < Decimal::ZERO {
        Err(CalculationError::Negative { name, value })
    } else {
        Ok(())
    }
}

fn ensure_periods(name: &'static str, periods: u32) -> Result<(), CalculationError> {
    if periods == 0 {
        Err(CalculationError::ZeroPeriod { name })
    } else {
        Ok(())
    }
}

/// `(1 + rate)^periods`
fn growth_factor(
    rate: Decimal,
    periods: u32,
    what: &'static str,
) -> Result<Decimal, CalculationError> {
    add(Decimal::ONE, rate, what)?
        .checked_powi(i64::from(periods))
        .ok_or(CalculationError::Arithmetic(what))
}

fn add(lhs: Decimal, rhs: Decimal, what: &'static str) -> Result<Decimal, CalculationError> {
    lhs.checked_add(rhs).ok_or(CalculationError::Arithmetic(what))
}

fn subtract(lhs: Decimal, rhs: Decimal, what: &'static str) -> Result<Decimal, CalculationError> {
    lhs.checked_sub(rhs).ok_or(CalculationError::Arithmetic(what))
}

fn multiply(lhs: Decimal, rhs: Decimal, what: &'static str) -> Result<Decimal, CalculationError> {
    lhs.checked_mul(rhs).ok_or(CalculationError::Arithmetic(what))
}

fn divide(
    dividend: Decimal,
    divisor: Decimal,
    what: &'static str,
) -> Result<Decimal, CalculationError> {
    dividend
        .checked_div(divisor)
        .ok_or(CalculationError::Arithmetic(what))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn growth() {
        assert_eq!(growth_factor(dec!(0.1), 2, "test"), Ok(dec!(1.21)));
        assert_eq!(growth_factor(dec!(0.5), 0, "test"), Ok(dec!(1)));
        assert_eq!(
            growth_factor(dec!(1000000), 100, "test"),
            Err(CalculationError::Arithmetic("test"))
        );
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(divide(dec!(1), dec!(4), "test"), Ok(dec!(0.25)));
        assert_eq!(
            divide(dec!(1), Decimal::ZERO, "test"),
            Err(CalculationError::Arithmetic("test"))
        );
    }

    #[test]
    fn overflow_is_an_error() {
        let overflow = Err(CalculationError::Arithmetic("test"));
        assert_eq!(add(Decimal::MAX, dec!(1), "test"), overflow);
        assert_eq!(subtract(Decimal::MIN, dec!(1), "test"), overflow);
        assert_eq!(multiply(Decimal::MAX, dec!(2), "test"), overflow);
        assert_eq!(growth_factor(Decimal::MAX, 1, "test"), overflow);
        assert_eq!(multiply(dec!(1.5), dec!(2), "test"), Ok(dec!(3)));
    }

    #[test]
    fn guards() {
        assert!(ensure_positive("principal", dec!(0.01)).is_ok());
        assert_eq!(
            ensure_positive("principal", dec!(0)).unwrap_err().to_string(),
            "principal must be positive, got 0"
        );
        assert!(ensure_non_negative("rate", dec!(0)).is_ok());
        assert!(ensure_non_negative("rate", dec!(-0.5)).is_err());
        assert!(ensure_periods("tenure", 1).is_ok());
        assert_eq!(
            ensure_periods("tenure", 0),
            Err(CalculationError::ZeroPeriod { name: "tenure" })
        );
    }
}
