use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::money::{monthly_rate, round_half_up};

/// Largest amount a single deposit may carry.
pub const DEPOSIT_LIMIT: Decimal = dec!(1000000);
/// Largest amount a single withdrawal from a savings account may carry.
pub const SAVINGS_WITHDRAWAL_LIMIT: Decimal = dec!(50000);
pub const UPGRADE_MIN_BALANCE: Decimal = dec!(100000);
pub const UPGRADE_MIN_TRANSACTIONS: u32 = 20;

const OVERDRAFT_FEE_BAND: Decimal = dec!(10000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    Regular,
    Savings,
    Premium,
}

impl AccountType {
    pub fn overdraft_limit(self) -> Decimal {
        match self {
            AccountType::Regular => dec!(10000),
            AccountType::Savings => Decimal::ZERO,
            AccountType::Premium => dec!(50000),
        }
    }

    /// Monthly maintenance charge for an active account holding `balance`.
    pub fn maintenance_charge(self, balance: Decimal) -> Decimal {
        match self {
            AccountType::Savings if balance < dec!(10000) => dec!(500),
            AccountType::Premium => dec!(1000),
            AccountType::Regular if balance < dec!(5000) => dec!(300),
            _ => Decimal::ZERO,
        }
    }

    pub fn earns_interest(self) -> bool {
        matches!(self, AccountType::Savings)
    }

    /// Exact, case-sensitive lookup by the name [`AccountType::as_str`] returns.
    /// Unlike [`FromStr`], `"premium"` or `" Premium"` do not match.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Regular" => Some(AccountType::Regular),
            "Savings" => Some(AccountType::Savings),
            "Premium" => Some(AccountType::Premium),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Regular => "Regular",
            AccountType::Savings => "Savings",
            AccountType::Premium => "Premium",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown account type `{0}`")]
pub struct ParseAccountTypeError(pub String);

impl FromStr for AccountType {
    type Err = ParseAccountTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(AccountType::Regular),
            "savings" => Ok(AccountType::Savings),
            "premium" => Ok(AccountType::Premium),
            _ => Err(ParseAccountTypeError(s.to_owned())),
        }
    }
}

/// Broad category of an [`AccountError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The supplied value is not acceptable.
    InvalidArgument,
    /// The account is in a state that does not permit the operation.
    InvalidState,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Initial balance cannot be negative, got {0}")]
    NegativeInitialBalance(Decimal),
    #[error("Single deposit cannot exceed {limit}, got {amount}")]
    DepositLimitExceeded { amount: Decimal, limit: Decimal },
    #[error("Withdrawal limit of {limit} exceeded for savings account, got {amount}")]
    SavingsWithdrawalLimitExceeded { amount: Decimal, limit: Decimal },
    #[error("Interest rate cannot be negative, got {0}")]
    NegativeInterestRate(Decimal),
    #[error("Account is not active")]
    AccountInactive,
    #[error("Crediting {amount} would overflow the balance")]
    BalanceOverflow { amount: Decimal },
    #[error("Interest on {balance} at {annual_rate}% is too large to compute")]
    InterestOverflow { balance: Decimal, annual_rate: Decimal },
}

impl AccountError {
    pub fn kind(&self) -> FaultKind {
        match self {
            AccountError::AccountInactive => FaultKind::InvalidState,
            AccountError::NegativeInitialBalance(_)
            | AccountError::DepositLimitExceeded { .. }
            | AccountError::SavingsWithdrawalLimitExceeded { .. }
            | AccountError::NegativeInterestRate(_)
            | AccountError::BalanceOverflow { .. }
            | AccountError::InterestOverflow { .. } => FaultKind::InvalidArgument,
        }
    }
}

/// Reason an operation was turned down without raising a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    NonPositiveAmount,
    InsufficientFunds,
    AccountInactive,
    NotEligible,
    UnsupportedUpgrade,
    NegativeBalance,
}

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Refused(Refusal),
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum AccountEvent {
    Deposited(Decimal),
    Withdrawn(Decimal),
    InterestCredited(Decimal),
    ChargeDeducted(Decimal),
    Upgraded(AccountType),
    Closed,
}

#[derive(Debug, PartialEq, Eq)]
enum Decision {
    Apply(AccountEvent),
    Refuse(Refusal),
}

#[derive(Debug, Clone)]
pub struct Account {
    balance: Decimal,
    account_type: AccountType,
    overdraft_limit: Decimal,
    transaction_count: u32,
    active: bool,
}

impl Account {
    pub fn new(account_type: AccountType, initial_balance: Decimal) -> Result<Self, AccountError> {
        if initial_balance < Decimal::ZERO {
            return Err(AccountError::NegativeInitialBalance(initial_balance));
        }
        debug!(%account_type, %initial_balance, "account opened");
        Ok(Self {
            balance: initial_balance,
            account_type,
            overdraft_limit: account_type.overdraft_limit(),
            transaction_count: 0,
            active: true,
        })
    }

    /// Balance rounded to two decimals; interest credits may leave more precision internally.
    pub fn balance(&self) -> Decimal {
        round_half_up(self.balance)
    }

    /// Balance plus whatever overdraft is still allowed, capped at `Decimal::MAX`.
    pub fn available_balance(&self) -> Decimal {
        self.balance.saturating_add(self.overdraft_limit)
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn transaction_count(&self) -> u32 {
        self.transaction_count
    }

    pub fn overdraft_limit(&self) -> Decimal {
        self.overdraft_limit
    }

    pub fn is_overdrawn(&self) -> bool {
        self.balance < Decimal::ZERO
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<Outcome, AccountError> {
        let decision = self.handle_deposit(amount)?;
        Ok(self.commit(decision))
    }

    /// Withdraws `amount`, letting the balance go negative down to `-overdraft_limit`.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Outcome, AccountError> {
        let decision = self.handle_withdrawal(amount)?;
        Ok(self.commit(decision))
    }

    /// Moves `amount` from this account into `target`.
    ///
    /// Both legs are decided before either account is touched: a transfer the
    /// target could not accept fails the same way a direct deposit would, and
    /// neither balance changes.
    pub fn transfer(&mut self, target: &mut Account, amount: Decimal) -> Result<Outcome, AccountError> {
        if !self.active || !target.active {
            return Ok(self.commit(Decision::Refuse(Refusal::AccountInactive)));
        }
        if amount <= Decimal::ZERO {
            return Ok(self.commit(Decision::Refuse(Refusal::NonPositiveAmount)));
        }

        let withdrawal = match self.handle_withdrawal(amount)? {
            Decision::Apply(event) => event,
            Decision::Refuse(reason) => return Ok(self.commit(Decision::Refuse(reason))),
        };
        let deposit = match target.handle_deposit(amount)? {
            Decision::Apply(event) => event,
            Decision::Refuse(reason) => return Ok(target.commit(Decision::Refuse(reason))),
        };

        self.apply(&withdrawal);
        target.apply(&deposit);
        Ok(Outcome::Applied)
    }

    pub fn calculate_monthly_interest(&self, annual_rate: Decimal) -> Result<Decimal, AccountError> {
        if annual_rate < Decimal::ZERO {
            return Err(self.fault(AccountError::NegativeInterestRate(annual_rate)));
        }
        if !self.account_type.earns_interest() || self.balance < Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        let interest = self
            .balance
            .checked_mul(monthly_rate(annual_rate))
            .ok_or_else(|| {
                self.fault(AccountError::InterestOverflow {
                    balance: self.balance,
                    annual_rate,
                })
            })?;
        Ok(round_half_up(interest))
    }

    /// Credits one month of interest and returns the credited amount.
    /// Nothing is credited when the interest is not positive.
    pub fn apply_interest(&mut self, annual_rate: Decimal) -> Result<Decimal, AccountError> {
        let interest = self.calculate_monthly_interest(annual_rate)?;
        if interest > Decimal::ZERO {
            self.ensure_credit_fits(interest)?;
            self.apply(&AccountEvent::InterestCredited(interest));
            Ok(interest)
        } else {
            Ok(Decimal::ZERO)
        }
    }

    pub fn calculate_maintenance_charge(&self) -> Decimal {
        if !self.active {
            return Decimal::ZERO;
        }
        self.account_type.maintenance_charge(self.balance)
    }

    pub fn deduct_maintenance_charge(&mut self) -> Outcome {
        let charge = self.calculate_maintenance_charge();
        if charge.is_zero() {
            return Outcome::Applied;
        }
        let decision = if self.balance >= charge {
            Decision::Apply(AccountEvent::ChargeDeducted(charge))
        } else {
            Decision::Refuse(Refusal::InsufficientFunds)
        };
        self.commit(decision)
    }

    pub fn can_upgrade(&self) -> bool {
        self.account_type == AccountType::Savings
            && self.balance >= UPGRADE_MIN_BALANCE
            && self.transaction_count >= UPGRADE_MIN_TRANSACTIONS
    }

    /// Only eligible savings accounts can move, and only to [`AccountType::Premium`].
    pub fn upgrade_account(&mut self, new_type: AccountType) -> Outcome {
        self.upgrade_account_to(Some(new_type))
    }

    /// Same as [`Account::upgrade_account`], where `None` stands for a target
    /// that names no known account type. Such a target is refused like any
    /// other non-Premium one.
    pub fn upgrade_account_to(&mut self, new_type: Option<AccountType>) -> Outcome {
        let decision = match new_type {
            _ if !self.can_upgrade() => Decision::Refuse(Refusal::NotEligible),
            Some(AccountType::Premium) => {
                Decision::Apply(AccountEvent::Upgraded(AccountType::Premium))
            }
            _ => Decision::Refuse(Refusal::UnsupportedUpgrade),
        };
        self.commit(decision)
    }

    /// Deactivates the account for good. Overdrawn accounts cannot be closed.
    pub fn close_account(&mut self) -> Outcome {
        let decision = if self.balance < Decimal::ZERO {
            Decision::Refuse(Refusal::NegativeBalance)
        } else {
            Decision::Apply(AccountEvent::Closed)
        };
        self.commit(decision)
    }

    /// Flat fee banded on the whole-unit overdraft, fractions are dropped before banding.
    pub fn calculate_overdraft_fee(&self) -> Decimal {
        if self.balance >= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let overdraft = self.balance.trunc().abs();
        if overdraft > OVERDRAFT_FEE_BAND {
            dec!(1000)
        } else if overdraft > Decimal::ZERO {
            dec!(500)
        } else {
            Decimal::ZERO
        }
    }

    fn handle_deposit(&self, amount: Decimal) -> Result<Decision, AccountError> {
        if !self.active {
            return Err(self.fault(AccountError::AccountInactive));
        }
        if amount <= Decimal::ZERO {
            return Ok(Decision::Refuse(Refusal::NonPositiveAmount));
        }
        if amount > DEPOSIT_LIMIT {
            return Err(self.fault(AccountError::DepositLimitExceeded {
                amount,
                limit: DEPOSIT_LIMIT,
            }));
        }
        self.ensure_credit_fits(amount)?;
        Ok(Decision::Apply(AccountEvent::Deposited(amount)))
    }

    fn ensure_credit_fits(&self, amount: Decimal) -> Result<(), AccountError> {
        match self.balance.checked_add(amount) {
            Some(_) => Ok(()),
            None => Err(self.fault(AccountError::BalanceOverflow { amount })),
        }
    }

    fn handle_withdrawal(&self, amount: Decimal) -> Result<Decision, AccountError> {
        if !self.active {
            return Err(self.fault(AccountError::AccountInactive));
        }
        if amount <= Decimal::ZERO {
            return Ok(Decision::Refuse(Refusal::NonPositiveAmount));
        }
        if amount > self.available_balance() {
            return Ok(Decision::Refuse(Refusal::InsufficientFunds));
        }
        // cap applies only once funds are known to be sufficient
        if self.account_type == AccountType::Savings && amount > SAVINGS_WITHDRAWAL_LIMIT {
            return Err(self.fault(AccountError::SavingsWithdrawalLimitExceeded {
                amount,
                limit: SAVINGS_WITHDRAWAL_LIMIT,
            }));
        }
        Ok(Decision::Apply(AccountEvent::Withdrawn(amount)))
    }

    fn commit(&mut self, decision: Decision) -> Outcome {
        match decision {
            Decision::Apply(event) => {
                self.apply(&event);
                Outcome::Applied
            }
            Decision::Refuse(reason) => {
                debug!(account_type = %self.account_type, ?reason, "operation refused");
                Outcome::Refused(reason)
            }
        }
    }

    fn apply(&mut self, event: &AccountEvent) {
        match *event {
            AccountEvent::Deposited(amount) => {
                self.balance += amount;
                self.transaction_count = self.transaction_count.saturating_add(1);
            }
            AccountEvent::Withdrawn(amount) => {
                self.balance -= amount;
                self.transaction_count = self.transaction_count.saturating_add(1);
            }
            AccountEvent::InterestCredited(amount) => self.balance += amount,
            AccountEvent::ChargeDeducted(amount) => self.balance -= amount,
            AccountEvent::Upgraded(new_type) => {
                info!(from = %self.account_type, to = %new_type, "account upgraded");
                self.account_type = new_type;
                self.overdraft_limit = new_type.overdraft_limit();
            }
            AccountEvent::Closed => {
                info!(account_type = %self.account_type, balance = %self.balance, "account closed");
                self.active = false;
            }
        }
        debug!(?event, balance = %self.balance, "event applied");
    }

    fn fault(&self, err: AccountError) -> AccountError {
        warn!(account_type = %self.account_type, %err, "account operation rejected");
        err
    }
}
