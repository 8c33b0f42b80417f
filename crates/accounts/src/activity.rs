use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pbank_core::Amount;

/// Kind of balance mutation recorded in an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Deposit,
    Withdraw,
}

impl core::fmt::Display for OperationType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            OperationType::Deposit => "DEPOSIT",
            OperationType::Withdraw => "WITHDRAW",
        })
    }
}

/// Operation selector for filtered statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperationFilter {
    Deposit,
    Withdraw,
    /// Matches every operation.
    #[default]
    Both,
}

impl OperationFilter {
    pub fn matches(self, operation: OperationType) -> bool {
        match self {
            OperationFilter::Both => true,
            OperationFilter::Deposit => operation == OperationType::Deposit,
            OperationFilter::Withdraw => operation == OperationType::Withdraw,
        }
    }
}

impl From<OperationType> for OperationFilter {
    fn from(value: OperationType) -> Self {
        match value {
            OperationType::Deposit => OperationFilter::Deposit,
            OperationType::Withdraw => OperationFilter::Withdraw,
        }
    }
}

/// One completed deposit or withdrawal (immutable).
///
/// `resulting_balance` is a snapshot of the account balance right after the
/// operation; it never changes when the account is mutated later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    activity_id: Uuid,
    occurred_at: DateTime<Utc>,
    operation: OperationType,
    transaction_amount: Amount,
    resulting_balance: Amount,
}

impl Activity {
    /// Record an activity happening now.
    pub(crate) fn record(
        operation: OperationType,
        transaction_amount: Amount,
        resulting_balance: Amount,
    ) -> Self {
        Self::at(Utc::now(), operation, transaction_amount, resulting_balance)
    }

    pub(crate) fn at(
        occurred_at: DateTime<Utc>,
        operation: OperationType,
        transaction_amount: Amount,
        resulting_balance: Amount,
    ) -> Self {
        Self {
            activity_id: Uuid::now_v7(),
            occurred_at,
            operation,
            transaction_amount,
            resulting_balance,
        }
    }

    pub fn activity_id(&self) -> Uuid {
        self.activity_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn operation(&self) -> OperationType {
        self.operation
    }

    pub fn transaction_amount(&self) -> &Amount {
        &self.transaction_amount
    }

    pub fn resulting_balance(&self) -> &Amount {
        &self.resulting_balance
    }

    /// Whether this activity falls in `[start, end)` and matches `filter`.
    pub fn is_within(&self, filter: OperationFilter, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        filter.matches(self.operation) && self.occurred_at >= start && self.occurred_at < end
    }
}

/// Statement line.
impl core::fmt::Display for Activity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} | {} | amount: {} | balance: {}",
            self.occurred_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.operation,
            self.transaction_amount,
            self.resulting_balance
        )
    }
}
