use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{AccountError, Outcome},
    command::{AccountCommandError, OperationKind},
};

pub mod account_processor;

#[derive(Debug, Error)]
pub enum OperationProcessError {
    #[error(transparent)]
    CommandErr(#[from] AccountCommandError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

pub trait OperationProcessor {
    fn process_operation(
        &mut self,
        kind: OperationKind,
        amount: Option<Decimal>,
        target: Option<&str>,
    ) -> Result<Outcome, OperationProcessError>;
}
