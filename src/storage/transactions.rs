use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::application::AppError;
use crate::domain::{
    summarize, total_for_type, AccountNumber, Cents, IdSequence, LedgerTotals, NewTransaction,
    Transaction, TransactionId, TransactionType,
};

/// Append-only, capacity-bounded transaction history.
///
/// Entries are never modified or removed once appended. Every query is a read
/// over the full history in insertion order.
pub struct TransactionLedger {
    entries: Vec<Transaction>,
    capacity: usize,
    ids: IdSequence,
}

impl TransactionLedger {
    pub const REGISTRY: &'static str = "Transaction";

    pub fn new(capacity: usize, ids: IdSequence) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            ids,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn has_capacity(&self) -> bool {
        self.entries.len() < self.capacity
    }

    pub fn ensure_capacity(&self) -> Result<(), AppError> {
        if self.has_capacity() {
            return Ok(());
        }
        warn!(capacity = self.capacity, "Transaction limit reached");
        Err(AppError::CapacityExceeded {
            registry: Self::REGISTRY,
            capacity: self.capacity,
        })
    }

    /// Id the next recorded transaction will receive.
    pub fn next_id(&self) -> TransactionId {
        TransactionId::new(self.ids.peek())
    }

    /// Issue an id and append a new entry.
    pub fn record(
        &mut self,
        entry: NewTransaction,
        timestamp: NaiveDateTime,
    ) -> Result<&Transaction, AppError> {
        self.ensure_capacity()?;
        let id = TransactionId::new(self.ids.next_value());
        self.add_transaction(Transaction::new(id, entry, timestamp))?;
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Append a prebuilt entry.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<(), AppError> {
        self.ensure_capacity()?;
        info!(
            transaction = %transaction.id(),
            account = %transaction.account_number(),
            kind = transaction.kind().as_str(),
            amount = transaction.amount(),
            "Transaction added"
        );
        self.entries.push(transaction);
        Ok(())
    }

    pub fn calculate_total_deposits(&self) -> Cents {
        total_for_type(&self.entries, TransactionType::Deposit)
    }

    pub fn calculate_total_withdrawals(&self) -> Cents {
        total_for_type(&self.entries, TransactionType::Withdrawal)
    }

    pub fn totals(&self) -> LedgerTotals {
        summarize(&self.entries)
    }

    /// Entries for one account, most recent first.
    pub fn view_transactions_by_account(&self, account_number: &AccountNumber) -> Vec<&Transaction> {
        self.entries
            .iter()
            .rev()
            .filter(|t| t.is_for(account_number))
            .collect()
    }

    /// Per-type totals restricted to one account.
    pub fn account_totals(&self, account_number: &AccountNumber) -> LedgerTotals {
        summarize(self.entries.iter().filter(|t| t.is_for(account_number)))
    }

    /// Full history, most recent first.
    pub fn all_transactions_newest_first(&self) -> Vec<&Transaction> {
        self.entries.iter().rev().collect()
    }

    /// Full history in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }
}
