//! Glue for running a CSV list of operations against one account, shared by
//! the binary and the integration tests.

use std::io::{Read, Write};

use crate::{
    account::Account,
    processor::{OperationProcessError, OperationProcessor, account_processor::AccountProcessor},
};
use anyhow::{Context, Result};
use csv_parser::CsvOperationParser;
use csv_printer::{AccountSummary, print_summary};
use tracing::{debug, info};
pub mod csv_parser;
pub mod csv_printer;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub account: Account,
    pub error_printer: Box<dyn FnMut(u64, OperationProcessError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut processor = AccountProcessor::new(self.account);

        for (line, row) in parser {
            let row = row.with_context(|| format!("Failed to parse operation at line {line}"))?;
            match processor.process_operation(row.kind, row.amount, row.target.as_deref()) {
                Ok(outcome) => debug!(line, ?outcome, "operation processed"),
                Err(err) => (self.error_printer)(line, err),
            }
        }
        info!(
            applied = processor.applied,
            refused = processor.refused,
            "all operations processed"
        );

        print_summary(self.output, &AccountSummary::from(&processor.account))
    }
}
