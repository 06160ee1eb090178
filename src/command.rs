use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::account::AccountType;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Deposit,
    Withdrawal,
    Interest,
    Maintenance,
    Upgrade,
    Close,
}

#[derive(Debug, Error)]
pub enum AccountCommandError {
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("Target account type is required for Upgrade")]
    TargetRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountCommand {
    Deposit(Decimal),
    Withdraw(Decimal),
    ApplyInterest { annual_rate: Decimal },
    DeductMaintenance,
    /// `None` when the target names no account type exactly.
    Upgrade(Option<AccountType>),
    Close,
}

impl AccountCommand {
    /// Builds a command from a raw operation row.
    ///
    /// Only the shape of the row is checked here; whether the amount or the
    /// upgrade target is acceptable is up to the account.
    pub fn parse_command(
        kind: OperationKind,
        amount: Option<Decimal>,
        target: Option<&str>,
    ) -> Result<Self, AccountCommandError> {
        let require_amount = || amount.ok_or(AccountCommandError::AmountRequired { kind });
        match kind {
            OperationKind::Deposit => Ok(Self::Deposit(require_amount()?)),
            OperationKind::Withdrawal => Ok(Self::Withdraw(require_amount()?)),
            OperationKind::Interest => Ok(Self::ApplyInterest {
                annual_rate: require_amount()?,
            }),
            OperationKind::Maintenance => Ok(Self::DeductMaintenance),
            OperationKind::Upgrade => {
                let target = target
                    .filter(|t| !t.trim().is_empty())
                    .ok_or(AccountCommandError::TargetRequired)?;
                Ok(Self::Upgrade(AccountType::from_name(target)))
            }
            OperationKind::Close => Ok(Self::Close),
        }
    }
}
