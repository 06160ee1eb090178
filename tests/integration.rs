use std::{cell::RefCell, rc::Rc, str::from_utf8};

use retail_banking::{
    account::{Account, AccountType},
    bin_utils::Service,
    processor::OperationProcessError,
};
use rust_decimal_macros::dec;

const OPERATIONS: &str = include_str!("operations.csv");
const OVERDRAFT: &str = include_str!("overdraft.csv");

fn run(account: Account, input: &str) -> (Vec<String>, Vec<String>) {
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&errors);
    let mut output = Vec::new();
    let service = Service {
        input: input.as_bytes(),
        output: &mut output,
        account,
        error_printer: Box::new(move |_line, err| {
            let kind = match &err {
                OperationProcessError::CommandErr(_) => "command",
                OperationProcessError::AccountErr(_) => "account",
            };
            sink.borrow_mut().push(format!("{kind}: {err}"));
        }),
    };
    service.run().unwrap();

    let lines = from_utf8(&output)
        .unwrap()
        .lines()
        .map(ToOwned::to_owned)
        .collect();
    let errors = errors.borrow().clone();
    (lines, errors)
}

#[test]
fn process_operations() {
    let account = Account::new(AccountType::Savings, dec!(10000)).unwrap();
    let (lines, errors) = run(account, OPERATIONS);

    assert_eq!(
        lines,
        vec![
            "account_type,balance,available,overdraft_limit,transactions,active,overdrawn,overdraft_fee,maintenance_charge",
            "Savings,13065.00,13065.00,0.00,2,true,false,0.00,0.00",
        ]
    );
    // unknown upgrade targets are refused by the account, not reported
    assert_eq!(errors, vec!["command: Amount is required for Deposit"]);
}

#[test]
fn upgrade_target_is_case_sensitive() {
    let mut input = String::from("type,amount,target\n");
    for _ in 0..20 {
        input.push_str("deposit,100,\n");
    }
    input.push_str("upgrade,,premium\nupgrade,,Premium\n");

    let account = Account::new(AccountType::Savings, dec!(150000)).unwrap();
    let (lines, errors) = run(account, &input);

    assert_eq!(
        lines[1],
        "Premium,152000.00,202000.00,50000.00,20,true,false,0.00,1000.00"
    );
    assert!(errors.is_empty());
}

#[test]
fn overdrawn_account_stays_open() {
    let account = Account::new(AccountType::Regular, dec!(5000)).unwrap();
    let (lines, errors) = run(account, OVERDRAFT);

    assert_eq!(
        lines[1],
        "Regular,-7000.00,3000.00,10000.00,1,true,true,500.00,300.00"
    );
    assert_eq!(
        errors,
        vec!["account: Single deposit cannot exceed 1000000, got 2000000"]
    );
}
