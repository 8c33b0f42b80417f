//! Walks through a deposit, a transfer and the resulting statements.

use anyhow::Context;
use chrono::{Duration, Utc};
use pbank_accounts::{
    Account, Beneficiary, ConsolePrinter, OperationFilter, Printer, TransferMediator,
};
use pbank_core::{Amount, Decimal};

fn main() -> anyhow::Result<()> {
    pbank_observability::init();

    let mut ankit = Beneficiary::builder().id("1").name("Ankit").build();
    let mut john = Beneficiary::builder().id("2").name("John").build();
    ankit.link_account(Account::new("ankitAccountId"));
    john.link_account(Account::new("johnAccountId"));

    let mediator = TransferMediator::new();
    let printer = ConsolePrinter::new();
    let started = Utc::now();

    let source = ankit.get_account_by_id("ankitAccountId")?;
    source.deposit_amount(&Amount::new(Decimal::from(100)))?;
    source.deposit_amount(&Amount::new(Decimal::from(200)))?;

    mediator
        .transfer_amount(
            &ankit,
            &john,
            "ankitAccountId",
            "johnAccountId",
            &Amount::new(Decimal::from(100)),
        )
        .context("transfer from Ankit to John")?;

    source.print_full_statement(Some(&printer));
    john.get_account_by_id("johnAccountId")?
        .print_full_statement(Some(&printer));

    printer.print("Deposits since start:");
    source.print_filtered_statement(
        Some(&printer),
        OperationFilter::Deposit,
        started,
        Utc::now() + Duration::days(1),
    );

    let empty = Account::new("fresh");
    if let Err(err) = empty.withdraw_amount(&Amount::new(Decimal::from(50))) {
        tracing::info!(error = %err, "withdrawal from an empty account refused as expected");
    }

    tracing::info!(lines = printer.call_count(), "demo finished");
    Ok(())
}
