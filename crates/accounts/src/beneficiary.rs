use tracing::warn;

use pbank_core::{BeneficiaryId, Entity, LedgerError, LedgerResult, find_by_id};

use crate::account::Account;

/// Account holder owning one or more accounts.
///
/// Accounts are linked after construction and never unlinked.
#[derive(Debug)]
pub struct Beneficiary {
    id: BeneficiaryId,
    name: String,
    accounts: Vec<Account>,
}

impl Beneficiary {
    pub fn new(id: impl Into<BeneficiaryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            accounts: Vec::new(),
        }
    }

    pub fn builder() -> BeneficiaryBuilder {
        BeneficiaryBuilder::default()
    }

    pub fn beneficiary_id(&self) -> &BeneficiaryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Linked accounts in link order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// First linked account with `account_id`.
    pub fn get_account_by_id(&self, account_id: &str) -> LedgerResult<&Account> {
        find_by_id(&self.accounts, account_id)
            .ok_or_else(|| LedgerError::account_not_found(account_id))
    }

    /// Append `account` to this beneficiary's accounts. Always returns `true`.
    ///
    /// Duplicate ids are accepted; lookups keep resolving to the account
    /// linked first.
    pub fn link_account(&mut self, account: Account) -> bool {
        if self.get_account_by_id(account.account_id().as_str()).is_ok() {
            warn!(
                beneficiary_id = %self.id,
                account_id = %account.account_id(),
                "duplicate account id linked; lookups resolve to the first one"
            );
        }
        self.accounts.push(account);
        true
    }
}

/// Identity is id + name; linked accounts are not compared.
impl PartialEq for Beneficiary {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for Beneficiary {}

impl Entity for Beneficiary {
    type Id = BeneficiaryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct BeneficiaryBuilder {
    id: String,
    name: String,
}

impl BeneficiaryBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn build(self) -> Beneficiary {
        Beneficiary::new(self.id, self.name)
    }
}
