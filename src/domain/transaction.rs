use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{format_timestamp, AccountNumber, Cents, TransactionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

impl TransactionType {
    /// Ledger label, e.g. `DEPOSIT`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
        }
    }

    /// Case-insensitive parse of `Deposit` / `Withdrawal`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "deposit" => Some(TransactionType::Deposit),
            "withdrawal" => Some(TransactionType::Withdrawal),
            _ => None,
        }
    }

    /// +1 for money entering the account, -1 for money leaving it.
    pub fn sign(&self) -> Cents {
        match self {
            TransactionType::Deposit => 1,
            TransactionType::Withdrawal => -1,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// The parts of a ledger entry known before the ledger assigns an id and time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub account_number: AccountNumber,
    pub kind: TransactionType,
    pub amount: Cents,
    pub balance_after: Cents,
}

/// An immutable ledger entry for a confirmed deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    account_number: AccountNumber,
    kind: TransactionType,
    /// Always positive; direction comes from `kind`
    amount: Cents,
    /// Account balance snapshot once this transaction was applied
    balance_after: Cents,
    timestamp: NaiveDateTime,
}

impl Transaction {
    pub fn new(id: TransactionId, entry: NewTransaction, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            account_number: entry.account_number,
            kind: entry.kind,
            amount: entry.amount,
            balance_after: entry.balance_after,
            timestamp,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn amount(&self) -> Cents {
        self.amount
    }

    pub fn balance_after(&self) -> Cents {
        self.balance_after
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn timestamp_label(&self) -> String {
        format_timestamp(&self.timestamp)
    }

    pub fn signed_amount(&self) -> Cents {
        self.kind.sign() * self.amount
    }

    pub fn is_for(&self, account_number: &AccountNumber) -> bool {
        &self.account_number == account_number
    }
}
