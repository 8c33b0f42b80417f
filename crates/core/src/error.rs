//! Ledger error model.

use thiserror::Error;

/// Result type used across the ledger.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// Every variant is a synchronous business failure: retrying the same call
/// against the same state fails the same way.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Arithmetic was attempted between amounts of different units.
    #[error("unit mismatch: expected '{expected}', found '{found}'")]
    UnitMismatch { expected: String, found: String },

    /// A withdrawal was attempted while the balance was not positive.
    #[error("insufficient balance for withdrawal (balance: {balance})")]
    InsufficientBalance { balance: String },

    /// A deposit or withdrawal was requested with a negative amount.
    #[error("amount must not be negative: {amount}")]
    NegativeAmount { amount: String },

    /// No account with the given id is linked to the beneficiary.
    #[error("account not found: {0}")]
    AccountNotFound(String),
}

impl LedgerError {
    pub fn unit_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnitMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn insufficient_balance(balance: impl core::fmt::Display) -> Self {
        Self::InsufficientBalance {
            balance: balance.to_string(),
        }
    }

    pub fn negative_amount(amount: impl core::fmt::Display) -> Self {
        Self::NegativeAmount {
            amount: amount.to_string(),
        }
    }

    pub fn account_not_found(id: impl Into<String>) -> Self {
        Self::AccountNotFound(id.into())
    }
}
