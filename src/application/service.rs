use chrono::NaiveDateTime;
use std::rc::Rc;
use tracing::{debug, info};

use crate::config::BankConfig;
use crate::domain::{
    Account, AccountKind, AccountNumber, Cents, Clock, Customer, CustomerId, FeeOutcome,
    IdSequence, NewCustomer, NewTransaction, SystemClock, Transaction, TransactionError,
    TransactionType,
};
use crate::storage::{AccountManager, CustomerManager, TransactionLedger};

use super::{
    AccountPreview, AccountStatement, AccountSummary, AppError, BankOverview, CustomerSummary,
    LedgerOverview, OpenedAccount, TransactionPreview, TransactionRow,
};

/// Application service providing the bank's high-level operations.
/// This is the primary interface for any client (CLI, tests, embedding code).
///
/// Mutating operations are unconditional: confirming with the user is the
/// caller's job and must happen before calling in.
pub struct BankService {
    config: BankConfig,
    accounts: AccountManager,
    customers: CustomerManager,
    ledger: TransactionLedger,
    clock: Box<dyn Clock>,
}

/// Input for the account-opening workflow
#[derive(Debug, Clone)]
pub struct OpenAccountRequest {
    pub customer: NewCustomer,
    pub kind: AccountKind,
    pub initial_deposit: Cents,
}

impl BankService {
    /// Create a service over empty registries using the system clock.
    pub fn new(config: BankConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: BankConfig, clock: Box<dyn Clock>) -> Self {
        let capacity = config.capacity;
        Self {
            accounts: AccountManager::new(capacity.accounts, IdSequence::accounts()),
            customers: CustomerManager::new(capacity.customers, IdSequence::customers()),
            ledger: TransactionLedger::new(capacity.transactions, IdSequence::transactions()),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    pub fn accounts(&self) -> &AccountManager {
        &self.accounts
    }

    pub fn customers(&self) -> &CustomerManager {
        &self.customers
    }

    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    /// Current time according to the service's clock.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    // ========================
    // Account opening
    // ========================

    /// Check an opening request without changing anything.
    pub fn preview_account(&self, request: &OpenAccountRequest) -> Result<AccountPreview, AppError> {
        if let Some(problem) = request.customer.problem() {
            return Err(AppError::InvalidCustomer(problem));
        }

        let minimum_deposit = self
            .config
            .minimum_opening_deposit(request.kind, request.customer.tier);
        if request.initial_deposit < minimum_deposit.max(0) {
            return Err(AppError::OpeningDepositTooLow {
                required: minimum_deposit,
                offered: request.initial_deposit,
            });
        }

        Ok(AccountPreview {
            customer_name: request.customer.name.trim().to_string(),
            customer_tier: request.customer.tier,
            kind: request.kind,
            initial_deposit: request.initial_deposit,
            minimum_deposit,
        })
    }

    /// Register the customer and open their account. Either both happen or neither.
    pub fn open_account(&mut self, request: OpenAccountRequest) -> Result<OpenedAccount, AppError> {
        self.preview_account(&request)?;
        self.accounts.ensure_capacity()?;
        self.customers.ensure_capacity()?;

        let now = self.clock.now();
        let customer = self.customers.register(request.customer, now)?;
        let policy = self.config.policy_for(request.kind);
        let account =
            self.accounts
                .open_account(Rc::clone(&customer), policy, request.initial_deposit)?;

        info!(
            account = %account.number(),
            customer = %customer.id,
            "Account created"
        );

        Ok(OpenedAccount {
            account: AccountSummary::from_account(account),
            customer: CustomerSummary::from_customer(&customer),
        })
    }

    // ========================
    // Transactions
    // ========================

    /// Describe a transaction without applying it.
    pub fn preview_transaction(
        &self,
        number: &AccountNumber,
        amount: Cents,
        kind: TransactionType,
    ) -> Result<TransactionPreview, AppError> {
        let account = self.accounts.find_account(number)?;
        Ok(TransactionPreview {
            transaction_id: self.ledger.next_id(),
            account_number: account.number().clone(),
            kind,
            amount,
            previous_balance: account.balance(),
            new_balance: account.projected_balance(amount, kind)?,
        })
    }

    /// Same as `preview_transaction`, naming the type by a case-insensitive label.
    pub fn preview_labeled(
        &self,
        number: &AccountNumber,
        amount: Cents,
        type_label: &str,
    ) -> Result<TransactionPreview, AppError> {
        self.preview_transaction(number, amount, parse_type_label(type_label)?)
    }

    /// Validate, apply and record a transaction.
    ///
    /// On any failure the account balance and the ledger are left unchanged.
    pub fn process_transaction(
        &mut self,
        number: &AccountNumber,
        amount: Cents,
        kind: TransactionType,
    ) -> Result<Transaction, AppError> {
        self.ledger.ensure_capacity()?;

        let account = self.accounts.find_account_mut(number)?;
        // `apply` validates before touching the balance, so an error leaves it unchanged
        let balance_after = account.apply(amount, kind).inspect_err(|err| {
            debug!(account = %number, kind = kind.as_str(), amount, %err, "Transaction rejected");
        })?;

        let entry = NewTransaction {
            account_number: number.clone(),
            kind,
            amount,
            balance_after,
        };
        let transaction = self.ledger.record(entry, self.clock.now())?.clone();
        info!(
            transaction = %transaction.id(),
            account = %number,
            balance = balance_after,
            "{} successful",
            kind.as_str()
        );
        Ok(transaction)
    }

    /// Same as `process_transaction`, naming the type by a case-insensitive label.
    pub fn process_labeled(
        &mut self,
        number: &AccountNumber,
        amount: Cents,
        type_label: &str,
    ) -> Result<Transaction, AppError> {
        self.process_transaction(number, amount, parse_type_label(type_label)?)
    }

    pub fn deposit(&mut self, number: &AccountNumber, amount: Cents) -> Result<Transaction, AppError> {
        self.process_transaction(number, amount, TransactionType::Deposit)
    }

    pub fn withdraw(&mut self, number: &AccountNumber, amount: Cents) -> Result<Transaction, AppError> {
        self.process_transaction(number, amount, TransactionType::Withdrawal)
    }

    /// Manually charge the monthly fee. Fees are not ledger transactions.
    pub fn apply_monthly_fee(&mut self, number: &AccountNumber) -> Result<FeeOutcome, AppError> {
        let account = self.accounts.find_account_mut(number)?;
        let outcome = account.apply_monthly_fee();
        if let FeeOutcome::Charged { fee, balance_after } = outcome {
            info!(account = %number, fee, balance = balance_after, "Monthly fee applied");
        }
        Ok(outcome)
    }

    pub fn projected_interest(&self, number: &AccountNumber) -> Result<Option<Cents>, AppError> {
        Ok(self.accounts.find_account(number)?.calculate_interest())
    }

    // ========================
    // Queries
    // ========================

    pub fn account(&self, number: &AccountNumber) -> Result<&Account, AppError> {
        self.accounts.find_account(number)
    }

    pub fn customer(&self, id: &CustomerId) -> Result<Rc<Customer>, AppError> {
        self.customers.find_customer(id)
    }

    pub fn account_summaries(&self) -> Vec<AccountSummary> {
        self.accounts.summaries()
    }

    pub fn customer_summaries(&self) -> Vec<CustomerSummary> {
        self.customers.summaries()
    }

    pub fn bank_overview(&self) -> BankOverview {
        BankOverview {
            accounts: self.accounts.summaries(),
            total_accounts: self.accounts.len(),
            total_balance: self.accounts.total_balance(),
        }
    }

    /// History for one account, most recent first.
    pub fn statement(&self, number: &AccountNumber) -> Result<AccountStatement, AppError> {
        let account = self.accounts.find_account(number)?;
        let transactions = self
            .ledger
            .view_transactions_by_account(number)
            .into_iter()
            .map(TransactionRow::from)
            .collect();

        Ok(AccountStatement {
            account: AccountSummary::from_account(account),
            transactions,
            totals: self.ledger.account_totals(number),
        })
    }

    /// Every transaction across all accounts, most recent first.
    pub fn transaction_history(&self) -> LedgerOverview {
        LedgerOverview {
            transactions: self
                .ledger
                .all_transactions_newest_first()
                .into_iter()
                .map(TransactionRow::from)
                .collect(),
            totals: self.ledger.totals(),
        }
    }
}

fn parse_type_label(type_label: &str) -> Result<TransactionType, TransactionError> {
    TransactionType::from_str(type_label)
        .ok_or_else(|| TransactionError::InvalidTransactionType(type_label.to_string()))
}
