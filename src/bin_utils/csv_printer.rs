use std::io::Write;

use anyhow::Context;
use csv::Writer;
use serde::Serialize;

use crate::account::Account;

/// Final state of an account, with amounts written to two decimals.
#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub account_type: &'static str,
    pub balance: String,
    pub available: String,
    pub overdraft_limit: String,
    pub transactions: u32,
    pub active: bool,
    pub overdrawn: bool,
    pub overdraft_fee: String,
    pub maintenance_charge: String,
}

impl From<&Account> for AccountSummary {
    fn from(acc: &Account) -> Self {
        Self {
            account_type: acc.account_type().as_str(),
            balance: format!("{:.2}", acc.balance()),
            available: format!("{:.2}", acc.available_balance()),
            overdraft_limit: format!("{:.2}", acc.overdraft_limit()),
            transactions: acc.transaction_count(),
            active: acc.is_active(),
            overdrawn: acc.is_overdrawn(),
            overdraft_fee: format!("{:.2}", acc.calculate_overdraft_fee()),
            maintenance_charge: format!("{:.2}", acc.calculate_maintenance_charge()),
        }
    }
}

/// Writes `summary` as a single CSV record below its header row.
pub fn print_summary<W: Write>(output: &mut W, summary: &AccountSummary) -> anyhow::Result<()> {
    let mut writer = Writer::from_writer(output);
    writer
        .serialize(summary)
        .context("Failed to write account summary")?;
    writer.flush().context("Failed to flush account summary")?;
    Ok(())
}
