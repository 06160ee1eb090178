//! Investment growth and return math.

use std::fmt;

use rust_decimal::{Decimal, MathematicalOps, prelude::ToPrimitive};
use rust_decimal_macros::dec;

use super::{
    CalculationError, add, divide, ensure_non_negative, ensure_periods, ensure_positive,
    growth_factor, multiply, subtract,
};
use crate::money::{monthly_rate, percent, round_half_up};

const HUNDRED: Decimal = dec!(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final amount of `principal` compounded `frequency` times a year: `P * (1 + r/f)^(f*t)`.
pub fn compound_interest(
    principal: Decimal,
    annual_rate: Decimal,
    years: u32,
    frequency: u32,
) -> Result<Decimal, CalculationError> {
    ensure_positive("principal", principal)?;
    ensure_non_negative("interest rate", annual_rate)?;
    ensure_periods("years", years)?;
    ensure_periods("compounding frequency", frequency)?;

    let periods = frequency
        .checked_mul(years)
        .ok_or(CalculationError::Arithmetic("compound interest"))?;
    let rate = percent(annual_rate) / Decimal::from(frequency);
    let factor = growth_factor(rate, periods, "compound interest")?;
    Ok(round_half_up(multiply(principal, factor, "compound interest")?))
}

/// Interest earned (not the final amount) at a flat annual rate.
pub fn simple_interest(
    principal: Decimal,
    annual_rate: Decimal,
    years: u32,
) -> Result<Decimal, CalculationError> {
    ensure_positive("principal", principal)?;
    ensure_non_negative("interest rate", annual_rate)?;
    ensure_periods("years", years)?;
    let yearly = multiply(principal, percent(annual_rate), "simple interest")?;
    Ok(round_half_up(multiply(yearly, Decimal::from(years), "simple interest")?))
}

/// Return on investment in percent.
pub fn roi(initial_investment: Decimal, final_value: Decimal) -> Result<Decimal, CalculationError> {
    ensure_positive("initial investment", initial_investment)?;
    let gain = subtract(final_value, initial_investment, "ROI")?;
    let ratio = divide(gain, initial_investment, "ROI")?;
    Ok(round_half_up(multiply(ratio, HUNDRED, "ROI")?))
}

/// Future value of a monthly SIP with contributions made at the start of each month.
pub fn sip_returns(
    monthly_investment: Decimal,
    annual_rate: Decimal,
    months: u32,
) -> Result<Decimal, CalculationError> {
    ensure_positive("monthly investment", monthly_investment)?;
    ensure_periods("months", months)?;

    if annual_rate.is_zero() {
        return multiply(monthly_investment, Decimal::from(months), "SIP returns");
    }

    let what = "SIP returns";
    let rate = monthly_rate(annual_rate);
    let power = growth_factor(rate, months, what)?;
    let accumulated = divide(power - Decimal::ONE, rate, what)?;
    let value = multiply(
        multiply(monthly_investment, accumulated, what)?,
        add(Decimal::ONE, rate, what)?,
        what,
    )?;
    Ok(round_half_up(value))
}

/// Months until cumulative returns cover the initial investment.
pub fn break_even_period(
    initial_investment: Decimal,
    monthly_return: Decimal,
) -> Result<u32, CalculationError> {
    ensure_positive("initial investment", initial_investment)?;
    ensure_positive("monthly return", monthly_return)?;
    divide(initial_investment, monthly_return, "break-even period")?
        .ceil()
        .to_u32()
        .ok_or(CalculationError::Arithmetic("break-even period"))
}

/// Whether `current_amount` grows to `goal_amount` with monthly compounding.
pub fn is_goal_achievable(
    current_amount: Decimal,
    goal_amount: Decimal,
    annual_rate: Decimal,
    years: u32,
) -> Result<bool, CalculationError> {
    if current_amount < Decimal::ZERO || goal_amount <= Decimal::ZERO || years == 0 {
        return Ok(false);
    }
    let future_value = compound_interest(current_amount, annual_rate, years, 12)?;
    Ok(future_value >= goal_amount)
}

/// Monthly contribution needed to reach `goal_amount`; inverse of [`sip_returns`].
pub fn required_monthly_sip(
    goal_amount: Decimal,
    annual_rate: Decimal,
    months: u32,
) -> Result<Decimal, CalculationError> {
    ensure_positive("goal amount", goal_amount)?;
    ensure_periods("months", months)?;

    if annual_rate.is_zero() {
        return divide(goal_amount, Decimal::from(months), "required SIP");
    }

    let what = "required SIP";
    let rate = monthly_rate(annual_rate);
    let power = growth_factor(rate, months, what)?;
    let sip = divide(
        multiply(goal_amount, rate, what)?,
        multiply(power - Decimal::ONE, add(Decimal::ONE, rate, what)?, what)?,
        what,
    )?;
    Ok(round_half_up(sip))
}

/// Value of a portfolio after each position earns its own return (in percent).
pub fn portfolio_value(
    investments: &[Decimal],
    returns: &[Decimal],
) -> Result<Decimal, CalculationError> {
    if investments.len() != returns.len() {
        return Err(CalculationError::LengthMismatch {
            investments: investments.len(),
            returns: returns.len(),
        });
    }
    let what = "portfolio value";
    let mut total = Decimal::ZERO;
    for (&investment, &ret) in investments.iter().zip(returns) {
        ensure_non_negative("investment", investment)?;
        let grown = multiply(investment, add(Decimal::ONE, percent(ret), what)?, what)?;
        total = add(total, grown, what)?;
    }
    Ok(round_half_up(total))
}

/// Share of the portfolio held outside its largest position, in percent.
pub fn diversification_ratio(investments: &[Decimal]) -> Result<Decimal, CalculationError> {
    if investments.is_empty() {
        return Err(CalculationError::NoInvestments);
    }
    let mut total = Decimal::ZERO;
    let mut largest = Decimal::ZERO;
    for &investment in investments {
        ensure_non_negative("investment", investment)?;
        total = add(total, investment, "diversification ratio")?;
        largest = largest.max(investment);
    }
    if total.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let concentration = divide(largest, total, "diversification ratio")?;
    Ok(round_half_up((Decimal::ONE - concentration) * HUNDRED))
}

/// Inflation-adjusted return in percent.
pub fn real_return(
    nominal_return: Decimal,
    inflation_rate: Decimal,
) -> Result<Decimal, CalculationError> {
    if inflation_rate >= HUNDRED {
        return Err(CalculationError::InflationTooHigh(inflation_rate));
    }
    let what = "real return";
    let growth = divide(
        add(Decimal::ONE, percent(nominal_return), what)?,
        add(Decimal::ONE, percent(inflation_rate), what)?,
        what,
    )?;
    Ok(round_half_up(multiply(growth - Decimal::ONE, HUNDRED, what)?))
}

pub fn assess_risk_level(volatility: Decimal) -> Result<RiskLevel, CalculationError> {
    ensure_non_negative("volatility", volatility)?;
    let level = if volatility < dec!(5) {
        RiskLevel::Low
    } else if volatility < dec!(15) {
        RiskLevel::Medium
    } else if volatility < dec!(25) {
        RiskLevel::High
    } else {
        RiskLevel::VeryHigh
    };
    Ok(level)
}

/// Compound annual growth rate in percent.
pub fn cagr(
    initial_value: Decimal,
    final_value: Decimal,
    years: u32,
) -> Result<Decimal, CalculationError> {
    ensure_positive("initial value", initial_value)?;
    ensure_positive("final value", final_value)?;
    ensure_periods("years", years)?;

    let exponent = Decimal::ONE / Decimal::from(years);
    let growth = divide(final_value, initial_value, "CAGR")?
        .checked_powd(exponent)
        .ok_or(CalculationError::Arithmetic("CAGR"))?;
    Ok(round_half_up(multiply(growth - Decimal::ONE, HUNDRED, "CAGR")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound() {
        assert_eq!(
            compound_interest(dec!(10000), dec!(10), 5, 12),
            Ok(dec!(16453.09))
        );
        assert_eq!(compound_interest(dec!(10000), dec!(10), 1, 1), Ok(dec!(11000)));
        assert_eq!(compound_interest(dec!(10000), dec!(0), 3, 4), Ok(dec!(10000)));
        assert!(compound_interest(dec!(-10000), dec!(10), 5, 12).is_err());
        assert!(compound_interest(dec!(10000), dec!(-10), 5, 12).is_err());
        assert_eq!(
            compound_interest(dec!(10000), dec!(10), 0, 12),
            Err(CalculationError::ZeroPeriod { name: "years" })
        );
        assert_eq!(
            compound_interest(dec!(10000), dec!(10), 5, 0),
            Err(CalculationError::ZeroPeriod {
                name: "compounding frequency"
            })
        );
    }

    #[test]
    fn simple() {
        assert_eq!(simple_interest(dec!(10000), dec!(10), 5), Ok(dec!(5000)));
        assert!(simple_interest(dec!(0), dec!(10), 5).is_err());
    }

    #[test]
    fn return_on_investment() {
        assert_eq!(roi(dec!(10000), dec!(15000)), Ok(dec!(50)));
        assert_eq!(roi(dec!(10000), dec!(8000)), Ok(dec!(-20)));
        assert!(roi(dec!(0), dec!(8000)).is_err());
    }

    #[test]
    fn sip() {
        assert!(sip_returns(dec!(5000), dec!(12), 24).unwrap() > dec!(120000));
        assert_eq!(sip_returns(dec!(5000), dec!(0), 24), Ok(dec!(120000)));
        assert!(sip_returns(dec!(-5000), dec!(12), 24).is_err());
        assert!(sip_returns(dec!(5000), dec!(12), 0).is_err());
    }

    #[test]
    fn required_sip_reaches_the_goal() {
        assert_eq!(required_monthly_sip(dec!(120000), dec!(0), 24), Ok(dec!(5000)));
        let sip = required_monthly_sip(dec!(100000), dec!(10), 24).unwrap();
        assert!(sip > dec!(0) && sip < dec!(100000) / dec!(24));
        let reached = sip_returns(sip, dec!(10), 24).unwrap();
        assert!((reached - dec!(100000)).abs() < dec!(1));
        assert!(required_monthly_sip(dec!(-100000), dec!(10), 24).is_err());
    }

    #[test]
    fn break_even() {
        assert_eq!(break_even_period(dec!(100000), dec!(5000)), Ok(20));
        assert_eq!(break_even_period(dec!(100001), dec!(5000)), Ok(21));
        assert!(break_even_period(dec!(-100000), dec!(5000)).is_err());
    }

    #[test]
    fn goals() {
        assert_eq!(is_goal_achievable(dec!(10000), dec!(15000), dec!(10), 5), Ok(true));
        assert_eq!(is_goal_achievable(dec!(10000), dec!(50000), dec!(5), 3), Ok(false));
        assert_eq!(is_goal_achievable(dec!(-10000), dec!(50000), dec!(5), 3), Ok(false));
        // nothing saved yet cannot be compounded
        assert!(is_goal_achievable(dec!(0), dec!(50000), dec!(5), 3).is_err());
    }

    #[test]
    fn portfolio() {
        let investments = [dec!(10000), dec!(20000), dec!(30000)];
        let returns = [dec!(10), dec!(15), dec!(20)];
        assert_eq!(portfolio_value(&investments, &returns), Ok(dec!(70000)));
        assert_eq!(
            portfolio_value(&investments, &returns[..2]),
            Err(CalculationError::LengthMismatch {
                investments: 3,
                returns: 2
            })
        );
        assert!(portfolio_value(&[dec!(-1)], &[dec!(10)]).is_err());
    }

    #[test]
    fn diversification() {
        assert_eq!(
            diversification_ratio(&[dec!(20000), dec!(30000), dec!(50000)]),
            Ok(dec!(50))
        );
        assert_eq!(diversification_ratio(&[dec!(100000)]), Ok(dec!(0)));
        assert_eq!(diversification_ratio(&[dec!(0), dec!(0)]), Ok(dec!(0)));
        assert_eq!(diversification_ratio(&[]), Err(CalculationError::NoInvestments));
        assert!(diversification_ratio(&[dec!(20000), dec!(-10000)]).is_err());
    }

    #[test]
    fn inflation_adjusted() {
        assert_eq!(real_return(dec!(15), dec!(5)), Ok(dec!(9.52)));
        assert_eq!(
            real_return(dec!(10), dec!(100)),
            Err(CalculationError::InflationTooHigh(dec!(100)))
        );
        assert_eq!(
            real_return(dec!(10), dec!(-100)),
            Err(CalculationError::Arithmetic("real return"))
        );
    }

    #[test]
    fn risk_levels() {
        assert_eq!(assess_risk_level(dec!(3)), Ok(RiskLevel::Low));
        assert_eq!(assess_risk_level(dec!(10)), Ok(RiskLevel::Medium));
        assert_eq!(assess_risk_level(dec!(20)), Ok(RiskLevel::High));
        assert_eq!(assess_risk_level(dec!(30)), Ok(RiskLevel::VeryHigh));
        assert_eq!(RiskLevel::VeryHigh.to_string(), "Very High");
        assert!(assess_risk_level(dec!(-5)).is_err());
    }

    #[test]
    fn growth_rate() {
        assert_eq!(cagr(dec!(10000), dec!(20000), 5), Ok(dec!(14.87)));
        assert_eq!(cagr(dec!(10000), dec!(12100), 2), Ok(dec!(10)));
        assert!(cagr(dec!(10000), dec!(0), 5).is_err());
    }

    #[test]
    fn huge_amounts_are_errors() {
        assert_eq!(
            roi(dec!(0.0000001), Decimal::MAX),
            Err(CalculationError::Arithmetic("ROI"))
        );
        assert_eq!(
            roi(Decimal::MAX, Decimal::MIN),
            Err(CalculationError::Arithmetic("ROI"))
        );
        assert_eq!(
            break_even_period(Decimal::MAX, dec!(0.1)),
            Err(CalculationError::Arithmetic("break-even period"))
        );
        assert_eq!(
            compound_interest(Decimal::MAX, dec!(10), 1, 1),
            Err(CalculationError::Arithmetic("compound interest"))
        );
        assert_eq!(
            simple_interest(Decimal::MAX, dec!(10), 20),
            Err(CalculationError::Arithmetic("simple interest"))
        );
        assert_eq!(
            sip_returns(Decimal::MAX, dec!(0), 2),
            Err(CalculationError::Arithmetic("SIP returns"))
        );
        assert_eq!(
            sip_returns(Decimal::MAX, dec!(12), 24),
            Err(CalculationError::Arithmetic("SIP returns"))
        );
        assert_eq!(
            required_monthly_sip(Decimal::MAX, Decimal::MAX, 24),
            Err(CalculationError::Arithmetic("required SIP"))
        );
        assert_eq!(
            portfolio_value(&[Decimal::MAX, Decimal::MAX], &[dec!(0), dec!(0)]),
            Err(CalculationError::Arithmetic("portfolio value"))
        );
        assert_eq!(
            diversification_ratio(&[Decimal::MAX, Decimal::MAX]),
            Err(CalculationError::Arithmetic("diversification ratio"))
        );
        assert_eq!(
            cagr(dec!(0.0000001), Decimal::MAX, 1),
            Err(CalculationError::Arithmetic("CAGR"))
        );
    }
}
