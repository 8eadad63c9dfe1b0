use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Account, AccountKind, AccountNumber, Cents, Customer, CustomerId, CustomerTier, LedgerTotals,
    PolicyDetails, Transaction, TransactionId, TransactionType,
};

/// One row of the accounts view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account_number: AccountNumber,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_tier: CustomerTier,
    pub kind: AccountKind,
    pub balance: Cents,
    pub status: String,
    pub details: PolicyDetails,
}

impl AccountSummary {
    pub fn from_account(account: &Account) -> Self {
        let customer = account.customer();
        Self {
            account_number: account.number().clone(),
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            customer_tier: customer.tier,
            kind: account.kind(),
            balance: account.balance(),
            status: account.status().as_str().to_string(),
            details: account.details(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub customer_id: CustomerId,
    pub name: String,
    pub tier: CustomerTier,
    pub age: u32,
    pub contact: String,
    pub address: String,
    pub fees_waived: bool,
}

impl CustomerSummary {
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            customer_id: customer.id.clone(),
            name: customer.name.clone(),
            tier: customer.tier,
            age: customer.age,
            contact: customer.contact.clone(),
            address: customer.address.clone(),
            fees_waived: customer.tier.waives_monthly_fee(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub transaction_id: TransactionId,
    pub account_number: AccountNumber,
    pub kind: TransactionType,
    pub amount: Cents,
    pub balance_after: Cents,
    pub timestamp: NaiveDateTime,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            transaction_id: t.id().clone(),
            account_number: t.account_number().clone(),
            kind: t.kind(),
            amount: t.amount(),
            balance_after: t.balance_after(),
            timestamp: t.timestamp(),
        }
    }
}

/// Per-account history, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountStatement {
    pub account: AccountSummary,
    pub transactions: Vec<TransactionRow>,
    pub totals: LedgerTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankOverview {
    pub accounts: Vec<AccountSummary>,
    pub total_accounts: usize,
    pub total_balance: Cents,
}

/// Every recorded transaction, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerOverview {
    pub transactions: Vec<TransactionRow>,
    pub totals: LedgerTotals,
}

/// What opening an account would do, for the caller's confirmation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountPreview {
    pub customer_name: String,
    pub customer_tier: CustomerTier,
    pub kind: AccountKind,
    pub initial_deposit: Cents,
    pub minimum_deposit: Cents,
}

/// What a transaction would do, for the caller's confirmation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPreview {
    pub transaction_id: TransactionId,
    pub account_number: AccountNumber,
    pub kind: TransactionType,
    pub amount: Cents,
    pub previous_balance: Cents,
    pub new_balance: Cents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenedAccount {
    pub account: AccountSummary,
    pub customer: CustomerSummary,
}
