//! Personal banking accounts.
//!
//! Accounts hold a balance and an append-only activity log; beneficiaries own
//! accounts; [`TransferMediator`] moves money between two accounts.
//! Everything here is synchronous and safe to call from many threads.

pub mod account;
pub mod activity;
pub mod beneficiary;
pub mod statement;
pub mod transfer;

pub use account::Account;
pub use activity::{Activity, OperationFilter, OperationType};
pub use beneficiary::{Beneficiary, BeneficiaryBuilder};
pub use statement::{ConsolePrinter, MemoryPrinter, Printer};
pub use transfer::{TransferMediator, TransferReceipt};
