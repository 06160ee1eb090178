use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Rounds to two decimal places, halves going towards positive infinity.
///
/// `-7000.005` becomes `-7000.00` while `7000.005` becomes `7000.01`. Works on
/// the whole `Decimal` range, the value is never scaled up.
pub fn round_half_up(value: Decimal) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(2, strategy)
}

/// Converts a percentage (e.g. `6` for 6%) into a fraction.
pub fn percent(value: Decimal) -> Decimal {
    value / HUNDRED
}

/// Monthly fraction of an annual percentage rate.
pub fn monthly_rate(annual_rate: Decimal) -> Decimal {
    annual_rate / MONTHS_PER_YEAR / HUNDRED
}
