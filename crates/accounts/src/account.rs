use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use pbank_core::{AccountId, Amount, Decimal, Entity, LedgerError, LedgerResult};

use crate::activity::{Activity, OperationFilter, OperationType};
use crate::statement::{self, Printer};

#[derive(Debug)]
struct AccountState {
    balance: Amount,
    activities: Vec<Activity>,
}

/// A balance plus its append-only activity log.
///
/// Deposits and withdrawals take the account's write lock for the whole
/// check-then-mutate step, so activity order is lock-acquisition order.
/// Reads take the read lock only long enough to copy a snapshot.
///
/// The balance is replaced only after every check has passed; a poisoned lock
/// therefore still guards a consistent state and is recovered transparently.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    unit: String,
    state: RwLock<AccountState>,
}

impl Account {
    /// New account with a zero balance in [`Amount::DEFAULT_UNIT`].
    pub fn new(id: impl Into<AccountId>) -> Self {
        Self::with_unit(id, Amount::DEFAULT_UNIT)
    }

    /// New account with a zero balance in `unit`.
    pub fn with_unit(id: impl Into<AccountId>, unit: impl Into<String>) -> Self {
        let unit = unit.into();
        Self {
            id: id.into(),
            state: RwLock::new(AccountState {
                balance: Amount::with_unit(Decimal::ZERO, unit.clone()),
                activities: Vec::new(),
            }),
            unit,
        }
    }

    pub fn account_id(&self) -> &AccountId {
        &self.id
    }

    /// Unit every amount moved through this account must use.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Current balance snapshot.
    pub fn net_amount(&self) -> Amount {
        self.read().balance.clone()
    }

    /// Snapshot of the full audit trail, oldest first.
    pub fn activities(&self) -> Vec<Activity> {
        self.read().activities.clone()
    }

    pub fn activity_count(&self) -> usize {
        self.read().activities.len()
    }

    /// Increase the balance by `amount` and record a deposit.
    ///
    /// Negative amounts are rejected with `NegativeAmount`.
    pub fn deposit_amount(&self, amount: &Amount) -> LedgerResult<Activity> {
        let mut state = self.write();

        let balance = ensure_not_negative(amount)
            .and_then(|()| state.balance.add(amount))
            .inspect_err(|err| {
                warn!(account_id = %self.id, %amount, error = %err, "deposit rejected");
            })?;

        Ok(self.commit(&mut state, OperationType::Deposit, amount, balance))
    }

    /// Decrease the balance by `amount` and record a withdrawal.
    ///
    /// Rejected with `NegativeAmount` for a negative `amount`, and with
    /// `InsufficientBalance` when the current balance is not positive
    /// (whatever the requested amount) or when the withdrawal would overdraw
    /// the account.
    pub fn withdraw_amount(&self, amount: &Amount) -> LedgerResult<Activity> {
        let mut state = self.write();

        let balance = ensure_not_negative(amount)
            .and_then(|()| state.balance.subtract(amount))
            .and_then(|balance| {
                if balance.value() < Decimal::ZERO {
                    Err(LedgerError::insufficient_balance(&state.balance))
                } else {
                    Ok(balance)
                }
            })
            .inspect_err(|err| {
                warn!(account_id = %self.id, %amount, error = %err, "withdrawal rejected");
            })?;

        Ok(self.commit(&mut state, OperationType::Withdraw, amount, balance))
    }

    fn commit(
        &self,
        state: &mut AccountState,
        operation: OperationType,
        amount: &Amount,
        balance: Amount,
    ) -> Activity {
        let activity = Activity::record(operation, amount.clone(), balance.clone());
        state.balance = balance;
        state.activities.push(activity.clone());

        debug!(
            account_id = %self.id,
            activity_id = %activity.activity_id(),
            %operation,
            %amount,
            balance = %state.balance,
            "activity recorded"
        );
        activity
    }

    /// Print header, every activity and footer. No-op without a printer.
    pub fn print_full_statement(&self, printer: Option<&dyn Printer>) {
        let Some(printer) = printer else {
            return;
        };

        let activities = self.activities();
        printer.print(&statement::header_line(&self.id));
        for activity in &activities {
            printer.print(&activity.to_string());
        }
        printer.print(&statement::footer_line(activities.len()));
    }

    /// Print activities matching `filter` with `start <= occurred_at < end`.
    ///
    /// No header or footer. No-op without a printer.
    pub fn print_filtered_statement(
        &self,
        printer: Option<&dyn Printer>,
        filter: OperationFilter,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) {
        let Some(printer) = printer else {
            return;
        };

        for line in self.statement_lines(filter, start, end) {
            printer.print(&line);
        }
    }

    /// Formatted lines of the filtered statement.
    pub fn statement_lines(
        &self,
        filter: OperationFilter,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<String> {
        self.read()
            .activities
            .iter()
            .filter(|activity| activity.is_within(filter, start, end))
            .map(ToString::to_string)
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, AccountState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AccountState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn ensure_not_negative(amount: &Amount) -> LedgerResult<()> {
    if amount.is_negative() {
        Err(LedgerError::negative_amount(amount))
    } else {
        Ok(())
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::MemoryPrinter;
    use chrono::Duration;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn inr(value: Decimal) -> Amount {
        Amount::new(value)
    }

    #[test]
    fn new_account_is_empty() {
        let account = Account::new("1");
        assert_eq!(account.account_id().as_str(), "1");
        assert_eq!(account.net_amount(), Amount::zero());
        assert!(account.activities().is_empty());
        assert_eq!(account.unit(), "inr");
    }

    #[test]
    fn deposits_accumulate_and_are_recorded_in_order() {
        let account = Account::new("1");

        account.deposit_amount(&inr(dec!(100))).unwrap();
        account.deposit_amount(&inr(dec!(200))).unwrap();

        assert_eq!(account.net_amount(), inr(dec!(300)));

        let activities = account.activities();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].operation(), OperationType::Deposit);
        assert_eq!(activities[0].transaction_amount(), &inr(dec!(100)));
        assert_eq!(activities[0].resulting_balance(), &inr(dec!(100)));
        assert_eq!(activities[1].resulting_balance(), &inr(dec!(300)));
        assert!(activities[0].occurred_at() <= activities[1].occurred_at());
    }

    #[test]
    fn recorded_balance_snapshot_is_not_affected_by_later_operations() {
        let account = Account::new("1");
        let first = account.deposit_amount(&inr(dec!(100))).unwrap();
        account.deposit_amount(&inr(dec!(50))).unwrap();

        assert_eq!(first.resulting_balance(), &inr(dec!(100)));
        assert_eq!(account.activities()[0].resulting_balance(), &inr(dec!(100)));
    }

    #[test]
    fn deposit_in_other_unit_is_rejected_without_side_effects() {
        let account = Account::new("1");
        let err = account
            .deposit_amount(&Amount::with_unit(dec!(10), "usd"))
            .unwrap_err();

        assert_eq!(err, LedgerError::unit_mismatch("inr", "usd"));
        assert_eq!(account.net_amount(), Amount::zero());
        assert_eq!(account.activity_count(), 0);
    }

    #[test]
    fn withdraw_decreases_balance() {
        let account = Account::new("1");
        account.deposit_amount(&inr(dec!(100))).unwrap();

        let activity = account.withdraw_amount(&inr(dec!(50))).unwrap();

        assert_eq!(activity.operation(), OperationType::Withdraw);
        assert_eq!(activity.resulting_balance(), &inr(dec!(50)));
        assert_eq!(account.net_amount(), inr(dec!(50)));
    }

    #[test]
    fn withdraw_whole_balance_is_allowed() {
        let account = Account::new("1");
        account.deposit_amount(&inr(dec!(75.25))).unwrap();
        account.withdraw_amount(&inr(dec!(75.25))).unwrap();
        assert_eq!(account.net_amount().value(), Decimal::ZERO);
    }

    #[test]
    fn withdraw_from_empty_account_fails_even_for_zero() {
        let account = Account::new("1");

        for requested in [dec!(50), dec!(0)] {
            let err = account.withdraw_amount(&inr(requested)).unwrap_err();
            assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        }
        assert_eq!(account.activity_count(), 0);
    }

    #[test]
    fn overdraft_is_rejected() {
        let account = Account::new("1");
        account.deposit_amount(&inr(dec!(10))).unwrap();

        let err = account.withdraw_amount(&inr(dec!(25))).unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(account.net_amount(), inr(dec!(10)));
        assert_eq!(account.activity_count(), 1);
    }

    #[test]
    fn negative_deposit_is_rejected_without_side_effects() {
        let account = Account::new("1");
        account.deposit_amount(&inr(dec!(10))).unwrap();

        let err = account.deposit_amount(&inr(dec!(-50))).unwrap_err();

        assert_eq!(err, LedgerError::negative_amount("-50 inr"));
        assert_eq!(account.net_amount(), inr(dec!(10)));
        assert_eq!(account.activity_count(), 1);
    }

    #[test]
    fn negative_withdrawal_is_rejected_without_side_effects() {
        let account = Account::new("1");
        account.deposit_amount(&inr(dec!(10))).unwrap();

        let err = account.withdraw_amount(&inr(dec!(-5))).unwrap_err();

        assert!(matches!(err, LedgerError::NegativeAmount { .. }));
        assert_eq!(account.net_amount(), inr(dec!(10)));
        assert_eq!(account.activity_count(), 1);
    }

    #[test]
    fn withdraw_in_other_unit_is_rejected() {
        let account = Account::new("1");
        account.deposit_amount(&inr(dec!(10))).unwrap();

        let err = account
            .withdraw_amount(&Amount::with_unit(dec!(5), "usd"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::UnitMismatch { .. }));
    }

    #[test]
    fn account_with_custom_unit() {
        let account = Account::with_unit("usd-1", "usd");
        account
            .deposit_amount(&Amount::with_unit(dec!(20), "usd"))
            .unwrap();
        assert!(account.deposit_amount(&inr(dec!(1))).is_err());
        assert_eq!(account.net_amount(), Amount::with_unit(dec!(20), "usd"));
    }

    #[test]
    fn full_statement_prints_header_activities_footer() {
        let account = Account::new("A");
        account.deposit_amount(&inr(dec!(100))).unwrap();
        account.withdraw_amount(&inr(dec!(40))).unwrap();

        let printer = MemoryPrinter::new();
        account.print_full_statement(Some(&printer));

        let lines = printer.lines();
        assert_eq!(printer.call_count(), 4);
        assert_eq!(lines[0], "----- Account A -----");
        assert!(lines[1].contains("DEPOSIT | amount: 100 inr | balance: 100 inr"));
        assert!(lines[2].contains("WITHDRAW | amount: 40 inr | balance: 60 inr"));
        assert_eq!(lines[3], "----- 2 activities -----");
    }

    #[test]
    fn statements_without_printer_are_no_ops() {
        let account = Account::new("A");
        account.deposit_amount(&inr(dec!(100))).unwrap();

        account.print_full_statement(None);
        let now = Utc::now();
        account.print_filtered_statement(None, OperationFilter::Both, now - Duration::days(1), now + Duration::days(1));
    }

    #[test]
    fn filtered_statement_counts_matching_activities() {
        let account = Account::new("A");
        let today = Utc::now();
        let tomorrow = today + Duration::days(1);

        account.deposit_amount(&inr(dec!(100))).unwrap();
        account.deposit_amount(&inr(dec!(50))).unwrap();
        account.deposit_amount(&inr(dec!(20))).unwrap();
        account.withdraw_amount(&inr(dec!(100))).unwrap();

        let printer = MemoryPrinter::new();

        account.print_filtered_statement(Some(&printer), OperationFilter::Deposit, today, tomorrow);
        assert_eq!(printer.call_count(), 3);

        account.print_filtered_statement(Some(&printer), OperationFilter::Withdraw, today, tomorrow);
        assert_eq!(printer.call_count(), 4);

        account.print_filtered_statement(Some(&printer), OperationFilter::Both, today, tomorrow);
        assert_eq!(printer.call_count(), 8);
    }

    #[test]
    fn filtered_statement_for_past_window_is_empty() {
        let account = Account::new("A");
        account.deposit_amount(&inr(dec!(100))).unwrap();

        let now = Utc::now();
        let lines = account.statement_lines(
            OperationFilter::Both,
            now - Duration::days(2),
            now - Duration::days(1),
        );
        assert!(lines.is_empty());
    }

    proptest! {
        /// Property: two deposits sum, and are recorded in call order.
        #[test]
        fn two_deposits_sum(a in 0i64..10_000_000, b in 0i64..10_000_000, scale in 0u32..3) {
            let first = inr(Decimal::new(a, scale));
            let second = inr(Decimal::new(b, scale));
            let account = Account::new("p");

            account.deposit_amount(&first).unwrap();
            account.deposit_amount(&second).unwrap();

            prop_assert_eq!(account.net_amount(), first.add(&second).unwrap());
            let activities = account.activities();
            prop_assert_eq!(activities.len(), 2);
            prop_assert_eq!(activities[0].transaction_amount(), &first);
            prop_assert_eq!(activities[1].transaction_amount(), &second);
        }
    }
}
