//! Format checks, limits and fraud heuristics for incoming transactions.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

pub const MAX_TRANSACTION_LIMIT: Decimal = dec!(500000);
pub const DAILY_LIMIT: Decimal = dec!(200000);
pub const MAX_RISK_SCORE: u8 = 100;
/// Risk score from which a transaction needs a second factor.
pub const VERIFICATION_THRESHOLD: u8 = 50;

const SUSPICIOUS_PATTERNS: [&str; 4] = ["<SCRIPT>", "DROP TABLE", "SELECT *", "--"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amounts cannot be negative")]
    NegativeAmount,
    #[error("Invalid hour {0}, expected 0-23")]
    InvalidHour(u32),
    #[error("Risk score must be between 0 and 100, got {0}")]
    RiskScoreOutOfRange(u8),
}

pub fn is_valid_amount(amount: Decimal) -> bool {
    amount > Decimal::ZERO && amount <= MAX_TRANSACTION_LIMIT
}

/// 10 to 16 digits.
pub fn is_valid_account_number(account_number: &str) -> bool {
    let len = account_number.chars().count();
    (10..=16).contains(&len) && account_number.chars().all(|c| c.is_ascii_digit())
}

/// Four letters, a literal `0`, then six letters or digits, e.g. `SBIN0001234`.
pub fn is_valid_ifsc(ifsc: &str) -> bool {
    let chars: Vec<char> = ifsc.chars().collect();
    chars.len() == 11
        && chars[..4].iter().all(|c| c.is_alphabetic())
        && chars[4] == '0'
        && chars[5..].iter().all(|c| c.is_alphanumeric())
}

pub fn is_daily_limit_exceeded(
    current_day_total: Decimal,
    new_amount: Decimal,
) -> Result<bool, ValidationError> {
    if current_day_total < Decimal::ZERO || new_amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount);
    }
    // a total too large to represent is past any limit
    Ok(current_day_total
        .checked_add(new_amount)
        .is_none_or(|total| total > DAILY_LIMIT))
}

/// Banking hours run from 09:00 up to, but excluding, 18:00.
pub fn is_valid_transaction_time(hour: u32) -> Result<bool, ValidationError> {
    if hour > 23 {
        return Err(ValidationError::InvalidHour(hour));
    }
    Ok((9..18).contains(&hour))
}

pub fn is_suspicious_transaction(amount: Decimal, frequency: u32, window_minutes: u32) -> bool {
    if amount > dec!(400000) {
        return true;
    }
    // burst of transactions
    if frequency > 5 && window_minutes < 10 {
        return true;
    }
    amount >= dec!(100000) && (amount % dec!(10000)).is_zero()
}

/// A 4 or 6 digit PIN that is neither a run like `123` / `987` nor one digit repeated.
pub fn is_valid_pin(pin: &str) -> bool {
    let Some(digits) = pin
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
    else {
        return false;
    };
    if digits.len() != 4 && digits.len() != 6 {
        return false;
    }
    !has_sequential_digits(&digits) && !has_repeated_digits(&digits)
}

/// Any three neighbours stepping by exactly one, in either direction at each step.
fn has_sequential_digits(digits: &[u32]) -> bool {
    digits
        .windows(3)
        .any(|w| w[0].abs_diff(w[1]) == 1 && w[1].abs_diff(w[2]) == 1)
}

fn has_repeated_digits(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

pub fn is_valid_beneficiary(account_number: &str, ifsc: &str, name: &str) -> bool {
    if !is_valid_account_number(account_number) || !is_valid_ifsc(ifsc) {
        return false;
    }
    if name.trim().is_empty() {
        return false;
    }
    (3..=50).contains(&name.chars().count())
}

pub fn requires_additional_verification(risk_score: u8) -> Result<bool, ValidationError> {
    if risk_score > MAX_RISK_SCORE {
        return Err(ValidationError::RiskScoreOutOfRange(risk_score));
    }
    Ok(risk_score >= VERIFICATION_THRESHOLD)
}

pub fn is_valid_description(description: &str) -> bool {
    if description.trim().is_empty() || description.chars().count() > 200 {
        return false;
    }
    let upper = description.to_uppercase();
    !SUSPICIOUS_PATTERNS
        .iter()
        .any(|pattern| upper.contains(pattern))
}

/// Facts about a transaction that feed its risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionRisk {
    pub amount: Decimal,
    pub international: bool,
    pub first_time: bool,
    pub account_age_months: u32,
}

impl TransactionRisk {
    pub fn score(&self) -> u8 {
        let mut score: u8 = 0;
        if self.amount > dec!(100000) {
            score += 30;
        } else if self.amount > dec!(50000) {
            score += 15;
        }
        if self.international {
            score += 25;
        }
        if self.first_time {
            score += 20;
        }
        if self.account_age_months < 6 {
            score += 15;
        }
        score.min(MAX_RISK_SCORE)
    }

    pub fn requires_additional_verification(&self) -> bool {
        self.score() >= VERIFICATION_THRESHOLD
    }
}
