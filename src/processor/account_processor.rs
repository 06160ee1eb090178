use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    account::{Account, Outcome},
    command::{AccountCommand, OperationKind},
};

use super::{OperationProcessError, OperationProcessor};

/// Runs operations one after another against a single account.
#[derive(Debug)]
pub struct AccountProcessor {
    pub account: Account,
    pub applied: usize,
    pub refused: usize,
}

impl AccountProcessor {
    pub fn new(account: Account) -> Self {
        Self {
            account,
            applied: 0,
            refused: 0,
        }
    }

    fn execute(&mut self, command: AccountCommand) -> Result<Outcome, OperationProcessError> {
        let outcome = match command {
            AccountCommand::Deposit(amount) => self.account.deposit(amount)?,
            AccountCommand::Withdraw(amount) => self.account.withdraw(amount)?,
            AccountCommand::ApplyInterest { annual_rate } => {
                let credited = self.account.apply_interest(annual_rate)?;
                debug!(%credited, "interest applied");
                Outcome::Applied
            }
            AccountCommand::DeductMaintenance => self.account.deduct_maintenance_charge(),
            AccountCommand::Upgrade(new_type) => self.account.upgrade_account_to(new_type),
            AccountCommand::Close => self.account.close_account(),
        };
        Ok(outcome)
    }
}

impl OperationProcessor for AccountProcessor {
    fn process_operation(
        &mut self,
        kind: OperationKind,
        amount: Option<Decimal>,
        target: Option<&str>,
    ) -> Result<Outcome, OperationProcessError> {
        let command = AccountCommand::parse_command(kind, amount, target)?;
        let outcome = self.execute(command)?;
        match outcome {
            Outcome::Applied => self.applied += 1,
            Outcome::Refused(_) => self.refused += 1,
        }
        Ok(outcome)
    }
}
