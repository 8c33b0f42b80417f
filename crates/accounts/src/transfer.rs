//! Moving money between two accounts.

use tracing::{info, warn};

use pbank_core::{Amount, LedgerError, LedgerResult};

use crate::activity::Activity;
use crate::beneficiary::Beneficiary;

/// The two activities recorded by a successful transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub withdrawal: Activity,
    pub deposit: Activity,
}

/// Stateless transfer service.
///
/// Construct one and pass it to whoever needs to move money; copies are
/// interchangeable.
///
/// Locking: the withdrawal and the deposit each lock only their own account
/// and release it before the next step starts. No two account locks are ever
/// held together, so concurrent transfers in opposite directions cannot
/// deadlock. The pair is not atomic: other callers may observe the source
/// debited before the destination is credited.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferMediator;

impl TransferMediator {
    pub fn new() -> Self {
        Self
    }

    /// Withdraw `amount` from `from_account_id` of `from` and deposit it into
    /// `to_account_id` of `to`.
    ///
    /// The destination's unit is checked against `amount` before anything is
    /// withdrawn. Account units never change and negative amounts are refused
    /// by the withdrawal, so once the withdrawal has succeeded the deposit
    /// cannot fail and no compensation is needed.
    ///
    /// Because of that check, a destination unit mismatch is reported as
    /// `UnitMismatch` even when the source balance is empty (a plain
    /// withdraw-then-deposit would have reported `InsufficientBalance`).
    #[tracing::instrument(
        name = "transfer",
        skip_all,
        fields(
            from = %from.beneficiary_id(),
            to = %to.beneficiary_id(),
            from_account = from_account_id,
            to_account = to_account_id,
            amount = %amount,
        )
    )]
    pub fn transfer_amount(
        &self,
        from: &Beneficiary,
        to: &Beneficiary,
        from_account_id: &str,
        to_account_id: &str,
        amount: &Amount,
    ) -> LedgerResult<TransferReceipt> {
        let source = from.get_account_by_id(from_account_id)?;
        let destination = to.get_account_by_id(to_account_id)?;

        if destination.unit() != amount.unit() {
            warn!(destination_unit = destination.unit(), "transfer rejected before withdrawal");
            return Err(LedgerError::unit_mismatch(destination.unit(), amount.unit()));
        }

        let withdrawal = source.withdraw_amount(amount)?;
        let deposit = destination.deposit_amount(amount)?;

        info!(
            withdrawal_id = %withdrawal.activity_id(),
            deposit_id = %deposit.activity_id(),
            "transfer completed"
        );

        Ok(TransferReceipt { withdrawal, deposit })
    }
}
