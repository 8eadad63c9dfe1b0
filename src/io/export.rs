use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::{BankOverview, BankService, CustomerSummary, LedgerOverview, TransactionRow};
use crate::domain::{format_cents, format_timestamp, AccountNumber, PolicyDetails};

/// Everything the session currently holds, for a JSON report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: String,
    pub exported_at: NaiveDateTime,
    pub overview: BankOverview,
    pub customers: Vec<CustomerSummary>,
    pub history: LedgerOverview,
}

const TRANSACTION_HEADER: [&str; 6] = [
    "transaction_id",
    "account_number",
    "type",
    "amount",
    "balance_after",
    "timestamp",
];

/// Exporter for turning bank data into CSV or JSON reports
pub struct Exporter<'a> {
    service: &'a BankService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a BankService) -> Self {
        Self { service }
    }

    /// Export one account's statement to CSV, most recent first
    pub fn export_statement_csv<W: Write>(&self, number: &AccountNumber, writer: W) -> Result<usize> {
        let statement = self.service.statement(number)?;
        write_transactions(&statement.transactions, writer)
    }

    /// Export the full transaction history to CSV, most recent first
    pub fn export_transactions_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let history = self.service.transaction_history();
        write_transactions(&history.transactions, writer)
    }

    /// Export the accounts view to CSV
    pub fn export_accounts_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let accounts = self.service.account_summaries();
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "account_number",
            "customer_id",
            "customer_name",
            "customer_tier",
            "type",
            "balance",
            "status",
            "interest_rate",
            "minimum_balance",
            "overdraft_limit",
            "monthly_fee",
        ])?;

        for account in &accounts {
            let (interest_rate, minimum_balance, overdraft_limit, monthly_fee) = match &account.details {
                PolicyDetails::Savings {
                    interest_rate,
                    minimum_balance,
                    ..
                } => (
                    interest_rate.to_string(),
                    format_cents(*minimum_balance),
                    String::new(),
                    String::new(),
                ),
                PolicyDetails::Checking {
                    overdraft_limit,
                    monthly_fee,
                    ..
                } => (
                    String::new(),
                    String::new(),
                    format_cents(*overdraft_limit),
                    format_cents(*monthly_fee),
                ),
            };

            csv_writer.write_record([
                account.account_number.as_str(),
                account.customer_id.as_str(),
                &account.customer_name,
                account.customer_tier.as_str(),
                account.kind.as_str(),
                &format_cents(account.balance),
                &account.status,
                &interest_rate,
                &minimum_balance,
                &overdraft_limit,
                &monthly_fee,
            ])?;
        }

        csv_writer.flush()?;
        Ok(accounts.len())
    }

    /// Export everything as a pretty-printed JSON snapshot
    pub fn export_snapshot_json<W: Write>(&self, mut writer: W) -> Result<SessionSnapshot> {
        let snapshot = SessionSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: self.service.now(),
            overview: self.service.bank_overview(),
            customers: self.service.customer_summaries(),
            history: self.service.transaction_history(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}

fn write_transactions<W: Write>(rows: &[TransactionRow], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(TRANSACTION_HEADER)?;

    for row in rows {
        csv_writer.write_record([
            row.transaction_id.as_str(),
            row.account_number.as_str(),
            row.kind.as_str(),
            &format_cents(row.amount),
            &format_cents(row.balance_after),
            &format_timestamp(&row.timestamp),
        ])?;
    }

    csv_writer.flush()?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::application::OpenAccountRequest;
    use crate::config::BankConfig;
    use crate::domain::{AccountKind, CustomerTier, FixedClock, NewCustomer};

    fn seeded() -> BankService {
        let at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut service =
            BankService::with_clock(BankConfig::default(), Box::new(FixedClock::new(at)));
        for kind in [AccountKind::Savings, AccountKind::Checking] {
            service
                .open_account(OpenAccountRequest {
                    customer: NewCustomer::new("Jane Doe", 25, "555", "1 Elm St", CustomerTier::Regular),
                    kind,
                    initial_deposit: 100000,
                })
                .unwrap();
        }
        let acc1 = AccountNumber::from("ACC001");
        service.deposit(&acc1, 50000).unwrap();
        service.withdraw(&acc1, 20000).unwrap();
        service.deposit(&AccountNumber::from("ACC002"), 100).unwrap();
        service
    }

    fn lines(bytes: Vec<u8>) -> Vec<String> {
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_statement_csv_newest_first() {
        let service = seeded();
        let mut out = Vec::new();
        let count = Exporter::new(&service)
            .export_statement_csv(&AccountNumber::from("ACC001"), &mut out)
            .unwrap();

        assert_eq!(count, 2);
        let lines = lines(out);
        assert_eq!(lines[0], TRANSACTION_HEADER.join(","));
        assert_eq!(lines[1], "TXN002,ACC001,WITHDRAWAL,200.00,1300.00,01-03-2024 09:00:00");
        assert_eq!(lines[2], "TXN001,ACC001,DEPOSIT,500.00,1500.00,01-03-2024 09:00:00");
    }

    #[test]
    fn test_statement_for_missing_account_fails() {
        let service = seeded();
        let result =
            Exporter::new(&service).export_statement_csv(&AccountNumber::from("ACC999"), Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_accounts_csv() {
        let service = seeded();
        let mut out = Vec::new();
        assert_eq!(Exporter::new(&service).export_accounts_csv(&mut out).unwrap(), 2);

        let lines = lines(out);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("ACC001,CUS001,Jane Doe,Regular,Savings,1300.00,Active,3.5,500.00,,"));
        assert!(lines[2].ends_with(",,,1000.00,10.00"));
    }

    #[test]
    fn test_transactions_csv_covers_all_accounts() {
        let service = seeded();
        let mut out = Vec::new();
        assert_eq!(Exporter::new(&service).export_transactions_csv(&mut out).unwrap(), 3);
        assert!(lines(out)[1].starts_with("TXN003,ACC002,DEPOSIT"));
    }

    #[test]
    fn test_snapshot_json() {
        let service = seeded();
        let mut out = Vec::new();
        let snapshot = Exporter::new(&service).export_snapshot_json(&mut out).unwrap();

        assert_eq!(snapshot.overview.total_accounts, 2);
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["history"]["totals"]["total_deposits"], 50100);
        assert_eq!(value["customers"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_snapshot_time_comes_from_service_clock() {
        let service = seeded();
        let snapshot = Exporter::new(&service).export_snapshot_json(Vec::new()).unwrap();

        assert_eq!(snapshot.exported_at.to_string(), "2024-03-01 09:00:00");
    }
}
