//! Loan repayment math: EMI, totals, eligibility and amortization.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{
    CalculationError, add, divide, ensure_non_negative, ensure_periods, ensure_positive,
    growth_factor, multiply, subtract,
};
use crate::money::{monthly_rate, percent, round_half_up};

/// Share of monthly income that may go towards loan repayments, in percent.
pub const MAX_EMI_TO_INCOME: Decimal = dec!(50);
pub const MAX_PREPAYMENT_PENALTY: Decimal = dec!(10);
/// Longest tenure an amortization schedule is built for (100 years).
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;

/// One month of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installment {
    pub month: u32,
    pub payment: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    pub remaining: Decimal,
}

/// Equated monthly installment: `P * r * (1 + r)^n / ((1 + r)^n - 1)`.
///
/// A zero rate splits the principal evenly and is returned unrounded.
pub fn emi(
    principal: Decimal,
    annual_rate: Decimal,
    tenure_months: u32,
) -> Result<Decimal, CalculationError> {
    ensure_positive("principal", principal)?;
    ensure_non_negative("interest rate", annual_rate)?;
    ensure_periods("tenure", tenure_months)?;

    if annual_rate.is_zero() {
        return divide(principal, Decimal::from(tenure_months), "EMI");
    }

    let rate = monthly_rate(annual_rate);
    let power = growth_factor(rate, tenure_months, "EMI")?;
    let numerator = multiply(multiply(principal, rate, "EMI")?, power, "EMI")?;
    let emi = divide(numerator, power - Decimal::ONE, "EMI")?;
    Ok(round_half_up(emi))
}

pub fn total_interest(
    principal: Decimal,
    annual_rate: Decimal,
    tenure_months: u32,
) -> Result<Decimal, CalculationError> {
    let emi = emi(principal, annual_rate, tenure_months)?;
    let repaid = multiply(emi, Decimal::from(tenure_months), "total interest")?;
    Ok(round_half_up(subtract(repaid, principal, "total interest")?))
}

pub fn total_amount(
    principal: Decimal,
    annual_rate: Decimal,
    tenure_months: u32,
) -> Result<Decimal, CalculationError> {
    let interest = total_interest(principal, annual_rate, tenure_months)?;
    add(principal, interest, "total amount")
}

/// Whether the new EMI plus existing obligations stays within half of the income.
/// Both EMIs count in whole units only. Obligations too large to compute are
/// never eligible.
pub fn is_eligible(monthly_income: Decimal, emi: Decimal, existing_emi: Decimal) -> bool {
    if monthly_income <= Decimal::ZERO {
        return false;
    }
    emi.trunc()
        .checked_add(existing_emi.trunc())
        .and_then(|total| total.checked_div(monthly_income))
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .is_some_and(|ratio| ratio <= MAX_EMI_TO_INCOME)
}

/// Largest principal whose EMI fits in half of `monthly_income`.
pub fn max_loan_amount(
    monthly_income: Decimal,
    annual_rate: Decimal,
    tenure_months: u32,
) -> Result<Decimal, CalculationError> {
    ensure_positive("income", monthly_income)?;

    let what = "maximum loan amount";
    let max_emi = multiply(monthly_income, percent(MAX_EMI_TO_INCOME), what)?;
    if annual_rate.is_zero() {
        return multiply(max_emi, Decimal::from(tenure_months), what);
    }

    let rate = monthly_rate(annual_rate);
    let power = growth_factor(rate, tenure_months, what)?;
    let principal = divide(
        multiply(max_emi, power - Decimal::ONE, what)?,
        multiply(rate, power, what)?,
        what,
    )?;
    Ok(round_half_up(principal))
}

/// Outstanding principal after `paid_months` installments.
pub fn remaining_principal(
    principal: Decimal,
    annual_rate: Decimal,
    tenure_months: u32,
    paid_months: u32,
) -> Result<Decimal, CalculationError> {
    if paid_months > tenure_months {
        return Err(CalculationError::PaidMonthsExceedTenure {
            paid: paid_months,
            tenure: tenure_months,
        });
    }
    if paid_months == 0 {
        return Ok(principal);
    }
    if paid_months == tenure_months {
        return Ok(Decimal::ZERO);
    }

    let emi = emi(principal, annual_rate, tenure_months)?;
    let rate = monthly_rate(annual_rate);
    let mut remaining = principal;
    let what = "remaining principal";
    for _ in 0..paid_months {
        let interest = multiply(remaining, rate, what)?;
        remaining = subtract(remaining, subtract(emi, interest, what)?, what)?;
        if remaining < Decimal::ZERO {
            remaining = Decimal::ZERO;
            break;
        }
    }
    Ok(round_half_up(remaining))
}

pub fn prepayment_penalty(
    remaining_principal: Decimal,
    penalty_percent: Decimal,
) -> Result<Decimal, CalculationError> {
    ensure_non_negative("remaining principal", remaining_principal)?;
    if penalty_percent < Decimal::ZERO || penalty_percent > MAX_PREPAYMENT_PENALTY {
        return Err(CalculationError::OutOfRange {
            name: "penalty percent",
            value: penalty_percent,
            min: Decimal::ZERO,
            max: MAX_PREPAYMENT_PENALTY,
        });
    }
    let penalty = multiply(remaining_principal, percent(penalty_percent), "prepayment penalty")?;
    Ok(round_half_up(penalty))
}

/// Refinancing pays off when the EMI savings over the remaining term exceed its cost.
pub fn should_refinance(
    current_rate: Decimal,
    new_rate: Decimal,
    remaining_principal: Decimal,
    remaining_months: u32,
    refinancing_cost: Decimal,
) -> Result<bool, CalculationError> {
    if new_rate >= current_rate {
        return Ok(false);
    }
    let current_emi = emi(remaining_principal, current_rate, remaining_months)?;
    let new_emi = emi(remaining_principal, new_rate, remaining_months)?;
    let monthly_savings = subtract(current_emi, new_emi, "refinancing savings")?;
    let savings = multiply(
        monthly_savings,
        Decimal::from(remaining_months),
        "refinancing savings",
    )?;
    Ok(savings > refinancing_cost)
}

pub fn interest_in_emi(
    remaining_principal: Decimal,
    annual_rate: Decimal,
) -> Result<Decimal, CalculationError> {
    if remaining_principal <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    let interest = multiply(remaining_principal, monthly_rate(annual_rate), "EMI interest")?;
    Ok(round_half_up(interest))
}

pub fn principal_in_emi(emi: Decimal, interest: Decimal) -> Result<Decimal, CalculationError> {
    if emi < interest {
        return Err(CalculationError::EmiBelowInterest { emi, interest });
    }
    Ok(round_half_up(subtract(emi, interest, "EMI principal")?))
}

/// Month-by-month split of every installment into interest and principal.
///
/// The final installment settles whatever principal is left, so the schedule
/// always ends at zero despite per-month rounding. Tenures above
/// [`MAX_SCHEDULE_MONTHS`] are rejected.
pub fn amortization_schedule(
    principal: Decimal,
    annual_rate: Decimal,
    tenure_months: u32,
) -> Result<Vec<Installment>, CalculationError> {
    if tenure_months > MAX_SCHEDULE_MONTHS {
        return Err(CalculationError::OutOfRange {
            name: "tenure",
            value: Decimal::from(tenure_months),
            min: Decimal::ONE,
            max: Decimal::from(MAX_SCHEDULE_MONTHS),
        });
    }
    let payment = round_half_up(emi(principal, annual_rate, tenure_months)?);
    let rate = monthly_rate(annual_rate);

    let what = "amortization schedule";
    let mut schedule = Vec::with_capacity(tenure_months as usize);
    let mut remaining = principal;
    for month in 1..=tenure_months {
        let interest = round_half_up(multiply(remaining, rate, what)?);
        let principal_paid = if month == tenure_months {
            remaining
        } else {
            subtract(payment, interest, what)?.min(remaining)
        };
        remaining -= principal_paid;
        schedule.push(Installment {
            month,
            payment: add(principal_paid, interest, what)?,
            interest,
            principal: principal_paid,
            remaining,
        });
    }
    Ok(schedule)
}
