use serde::{Deserialize, Serialize};

use super::{Cents, Transaction, TransactionType};

/// Per-type totals over a set of transactions. Sums saturate at the bounds of `Cents`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub count: usize,
    pub total_deposits: Cents,
    pub total_withdrawals: Cents,
}

impl LedgerTotals {
    /// Deposits minus withdrawals.
    pub fn net(&self) -> Cents {
        self.total_deposits.saturating_sub(self.total_withdrawals)
    }
}

/// Sum of amounts for a single transaction type.
pub fn total_for_type<'a, I>(transactions: I, kind: TransactionType) -> Cents
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.kind() == kind)
        .map(Transaction::amount)
        .fold(0, Cents::saturating_add)
}

/// Count and per-type totals in one pass.
pub fn summarize<'a, I>(transactions: I) -> LedgerTotals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(LedgerTotals::default(), |mut totals, t| {
            totals.count += 1;
            match t.kind() {
                TransactionType::Deposit => {
                    totals.total_deposits = totals.total_deposits.saturating_add(t.amount())
                }
                TransactionType::Withdrawal => {
                    totals.total_withdrawals = totals.total_withdrawals.saturating_add(t.amount())
                }
            }
            totals
        })
}

/// Net of signed amounts: what the transactions did to balances overall.
pub fn net_flow<'a, I>(transactions: I) -> Cents
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .map(Transaction::signed_amount)
        .fold(0, Cents::saturating_add)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{AccountNumber, NewTransaction, TransactionId};

    fn make(id: &str, account: &str, kind: TransactionType, amount: Cents) -> Transaction {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Transaction::new(
            TransactionId::from(id),
            NewTransaction {
                account_number: AccountNumber::from(account),
                kind,
                amount,
                balance_after: 0,
            },
            at,
        )
    }

    #[test]
    fn test_summarize_empty() {
        let totals = summarize(&Vec::<Transaction>::new());
        assert_eq!(totals, LedgerTotals::default());
        assert_eq!(totals.net(), 0);
    }

    #[test]
    fn test_summarize_mixed() {
        let transactions = vec![
            make("TXN001", "ACC001", TransactionType::Deposit, 50000),
            make("TXN002", "ACC001", TransactionType::Withdrawal, 20000),
            make("TXN003", "ACC002", TransactionType::Deposit, 30000),
        ];

        let totals = summarize(&transactions);
        assert_eq!(totals.count, 3);
        assert_eq!(totals.total_deposits, 80000);
        assert_eq!(totals.total_withdrawals, 20000);
        assert_eq!(totals.net(), 60000);
    }

    #[test]
    fn test_totals_agree_with_net_flow() {
        let transactions = vec![
            make("TXN001", "ACC001", TransactionType::Deposit, 12345),
            make("TXN002", "ACC002", TransactionType::Withdrawal, 999),
            make("TXN003", "ACC001", TransactionType::Withdrawal, 5000),
            make("TXN004", "ACC003", TransactionType::Deposit, 1),
        ];

        let deposits = total_for_type(&transactions, TransactionType::Deposit);
        let withdrawals = total_for_type(&transactions, TransactionType::Withdrawal);

        assert_eq!(deposits - withdrawals, net_flow(&transactions));
        assert_eq!(summarize(&transactions).net(), net_flow(&transactions));
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let transactions = vec![
            make("TXN001", "ACC001", TransactionType::Deposit, Cents::MAX),
            make("TXN002", "ACC002", TransactionType::Deposit, Cents::MAX),
            make("TXN003", "ACC003", TransactionType::Withdrawal, Cents::MAX),
            make("TXN004", "ACC003", TransactionType::Withdrawal, Cents::MAX),
        ];

        let totals = summarize(&transactions);
        assert_eq!(totals.total_deposits, Cents::MAX);
        assert_eq!(totals.total_withdrawals, Cents::MAX);
        assert_eq!(totals.net(), 0);
        assert_eq!(total_for_type(&transactions, TransactionType::Deposit), Cents::MAX);

        let withdrawals = &transactions[2..];
        assert_eq!(summarize(withdrawals).net(), -Cents::MAX);
        assert_eq!(net_flow(withdrawals), Cents::MIN);
    }

    #[test]
    fn test_filtered_summary() {
        let transactions = vec![
            make("TXN001", "ACC001", TransactionType::Deposit, 50000),
            make("TXN002", "ACC002", TransactionType::Withdrawal, 20000),
        ];
        let acc = AccountNumber::from("ACC001");
        let totals = summarize(transactions.iter().filter(|t| t.is_for(&acc)));
        assert_eq!(totals.count, 1);
        assert_eq!(totals.total_withdrawals, 0);
    }
}
