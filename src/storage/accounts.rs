use std::rc::Rc;
use tracing::{info, warn};

use crate::application::{AccountSummary, AppError};
use crate::domain::{Account, AccountNumber, AccountPolicy, Cents, Customer, IdSequence};

/// Capacity-bounded registry of accounts in opening order.
pub struct AccountManager {
    accounts: Vec<Account>,
    capacity: usize,
    numbers: IdSequence,
}

impl AccountManager {
    pub const REGISTRY: &'static str = "Account";

    pub fn new(capacity: usize, numbers: IdSequence) -> Self {
        Self {
            accounts: Vec::new(),
            capacity,
            numbers,
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn has_capacity(&self) -> bool {
        self.accounts.len() < self.capacity
    }

    /// Number the next opened account will receive.
    pub fn next_number(&self) -> AccountNumber {
        AccountNumber::new(self.numbers.peek())
    }

    pub fn ensure_capacity(&self) -> Result<(), AppError> {
        if self.has_capacity() {
            return Ok(());
        }
        warn!(capacity = self.capacity, "Account limit reached");
        Err(AppError::CapacityExceeded {
            registry: Self::REGISTRY,
            capacity: self.capacity,
        })
    }

    /// Issue a number and register a new account. Nothing is consumed on rejection.
    pub fn open_account(
        &mut self,
        customer: Rc<Customer>,
        policy: AccountPolicy,
        initial_deposit: Cents,
    ) -> Result<&Account, AppError> {
        self.ensure_capacity()?;
        let number = AccountNumber::new(self.numbers.next_value());
        let account = Account::open(number, customer, policy, initial_deposit);
        self.add_account(account)?;
        Ok(&self.accounts[self.accounts.len() - 1])
    }

    /// Register an already-built account.
    pub fn add_account(&mut self, account: Account) -> Result<(), AppError> {
        self.ensure_capacity()?;
        if self.accounts.iter().any(|a| a.number() == account.number()) {
            return Err(AppError::DuplicateAccount(account.number().clone()));
        }
        info!(
            account = %account.number(),
            kind = account.account_type(),
            balance = account.balance(),
            "Account added"
        );
        self.accounts.push(account);
        Ok(())
    }

    pub fn find_account(&self, number: &AccountNumber) -> Result<&Account, AppError> {
        self.accounts
            .iter()
            .find(|a| a.number() == number)
            .ok_or_else(|| AppError::AccountNotFound(number.clone()))
    }

    pub fn find_account_mut(&mut self, number: &AccountNumber) -> Result<&mut Account, AppError> {
        self.accounts
            .iter_mut()
            .find(|a| a.number() == number)
            .ok_or_else(|| AppError::AccountNotFound(number.clone()))
    }

    /// Sum of all balances; overdrawn accounts contribute negatively.
    /// Saturates at the bounds of `Cents`.
    pub fn total_balance(&self) -> Cents {
        self.accounts
            .iter()
            .map(Account::balance)
            .fold(0, Cents::saturating_add)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn summaries(&self) -> Vec<AccountSummary> {
        self.accounts.iter().map(AccountSummary::from_account).collect()
    }
}
