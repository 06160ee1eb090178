use std::fs::File;

use anyhow::{Context, Result};
use retail_banking::{
    account::{Account, AccountType},
    bin_utils::Service,
    processor::OperationProcessError,
};
use rust_decimal::Decimal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let account_type: AccountType = args
        .next()
        .context("Expected an account type as the first argument")?
        .parse()?;
    let initial_balance: Decimal = args
        .next()
        .context("Expected an initial balance as the second argument")?
        .parse()
        .context("Initial balance is not a valid amount")?;
    let filename = args
        .next()
        .context("Expected a file name as the third argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        account: Account::new(account_type, initial_balance)?,
        error_printer: Box::new(|line, err| {
            match err {
                OperationProcessError::CommandErr(err) => {
                    eprintln!("Error at line {line}: {err}")
                }
                OperationProcessError::AccountErr(_) => {
                    // already logged by the account itself
                }
            }
        }),
    };
    service.run()
}
