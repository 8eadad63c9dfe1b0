//! Plain-text tables for the session output.

use std::fmt::Write;

use crate::application::{
    AccountPreview, AccountSummary, CustomerSummary, OpenedAccount, TransactionPreview,
    TransactionRow,
};
use crate::domain::{
    format_cents, format_money, format_timestamp, AccountNumber, Cents, FeeOutcome,
    LedgerTotals, PolicyDetails,
};

pub fn accounts_table(accounts: &[AccountSummary], total_balance: Cents) -> String {
    if accounts.is_empty() {
        return "No accounts available.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<20} {:<9} {:>12} {:<8} {}",
        "ACC NO", "CUSTOMER", "TYPE", "BALANCE", "STATUS", "DETAILS"
    );
    let _ = writeln!(out, "{}", "-".repeat(80));
    for account in accounts {
        let _ = writeln!(
            out,
            "{:<8} {:<20} {:<9} {:>12} {:<8} {}",
            account.account_number,
            truncate(&account.customer_name, 20),
            account.kind,
            format_cents(account.balance),
            account.status,
            policy_line(&account.details)
        );
    }
    let _ = writeln!(out, "{}", "-".repeat(80));
    let _ = writeln!(out, "Total Accounts: {}", accounts.len());
    let _ = writeln!(out, "Total Bank Balance: {}", format_money(total_balance));
    out
}

pub fn customers_table(customers: &[CustomerSummary]) -> String {
    if customers.is_empty() {
        return "No customers available.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<20} {:>4} {:<14} {:<8} {}",
        "CUST ID", "NAME", "AGE", "CONTACT", "TIER", "ADDRESS"
    );
    let _ = writeln!(out, "{}", "-".repeat(80));
    for customer in customers {
        let _ = writeln!(
            out,
            "{:<8} {:<20} {:>4} {:<14} {:<8} {}",
            customer.customer_id,
            truncate(&customer.name, 20),
            customer.age,
            truncate(&customer.contact, 14),
            customer.tier,
            customer.address
        );
    }
    let _ = writeln!(out, "Total Customers: {}", customers.len());
    out
}

pub fn transactions_table(rows: &[TransactionRow]) -> String {
    if rows.is_empty() {
        return "No transactions recorded.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<8} {:<10} {:>12} {:>12} {}",
        "TXN ID", "ACCOUNT", "TYPE", "AMOUNT", "BALANCE", "DATE/TIME"
    );
    let _ = writeln!(out, "{}", "-".repeat(76));
    for row in rows {
        let signed = row.kind.sign() * row.amount;
        let amount = if signed >= 0 {
            format!("+{}", format_cents(signed))
        } else {
            format_cents(signed)
        };
        let _ = writeln!(
            out,
            "{:<8} {:<8} {:<10} {:>12} {:>12} {}",
            row.transaction_id,
            row.account_number,
            row.kind,
            amount,
            format_cents(row.balance_after),
            format_timestamp(&row.timestamp)
        );
    }
    out
}

pub fn totals(totals: &LedgerTotals) -> String {
    format!(
        "Number of transactions: {}\nTotal Deposits: {}\nTotal Withdrawals: {}\nNet Change: {}\n",
        totals.count,
        format_money(totals.total_deposits),
        format_money(totals.total_withdrawals),
        format_money(totals.net())
    )
}

pub fn account_details(account: &AccountSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Account Number: {}", account.account_number);
    let _ = writeln!(
        out,
        "Customer: {} ({}, {})",
        account.customer_name, account.customer_id, account.customer_tier
    );
    let _ = writeln!(out, "Account Type: {}", account.kind);
    let _ = writeln!(out, "Balance: {}", format_money(account.balance));
    let _ = writeln!(out, "Status: {}", account.status);
    match &account.details {
        PolicyDetails::Savings {
            interest_rate,
            minimum_balance,
            projected_interest,
        } => {
            let _ = writeln!(out, "Interest Rate: {}%", interest_rate);
            let _ = writeln!(out, "Minimum Balance: {}", format_money(*minimum_balance));
            let _ = writeln!(out, "Projected Interest: {}", format_money(*projected_interest));
        }
        PolicyDetails::Checking {
            overdraft_limit,
            monthly_fee,
            fee_waived,
        } => {
            let _ = writeln!(out, "Overdraft Limit: {}", format_money(*overdraft_limit));
            if *fee_waived {
                let _ = writeln!(out, "Monthly Fee: {} (WAIVED)", format_money(*monthly_fee));
            } else {
                let _ = writeln!(out, "Monthly Fee: {}", format_money(*monthly_fee));
            }
        }
    }
    out
}

pub fn account_preview(preview: &AccountPreview) -> String {
    format!(
        "Customer: {} ({})\nAccount Type: {}\nInitial Deposit: {}\n",
        preview.customer_name,
        preview.customer_tier,
        preview.kind,
        format_money(preview.initial_deposit)
    )
}

pub fn opened_account(opened: &OpenedAccount) -> String {
    format!(
        "Account created successfully!\nCustomer ID: {}\n{}",
        opened.customer.customer_id,
        account_details(&opened.account)
    )
}

pub fn transaction_preview(preview: &TransactionPreview) -> String {
    format!(
        "Transaction ID: {}\nAccount: {}\nType: {}\nAmount: {}\nPrevious Balance: {}\nNew Balance: {}\n",
        preview.transaction_id,
        preview.account_number,
        preview.kind,
        format_money(preview.amount),
        format_money(preview.previous_balance),
        format_money(preview.new_balance)
    )
}

pub fn fee_outcome(number: &AccountNumber, outcome: &FeeOutcome) -> String {
    match outcome {
        FeeOutcome::Charged { fee, balance_after } => format!(
            "Monthly fee of {} charged to {}. New balance: {}",
            format_money(*fee),
            number,
            format_money(*balance_after)
        ),
        FeeOutcome::Waived => format!("Monthly fee waived for {} (premium customer)", number),
        FeeOutcome::Skipped => format!("Balance of {} does not cover the monthly fee; not charged", number),
        FeeOutcome::NotApplicable => format!("{} is not a checking account; no monthly fee", number),
    }
}

fn policy_line(details: &PolicyDetails) -> String {
    match details {
        PolicyDetails::Savings {
            interest_rate,
            minimum_balance,
            ..
        } => format!("Interest {}%, Min {}", interest_rate, format_money(*minimum_balance)),
        PolicyDetails::Checking {
            overdraft_limit,
            monthly_fee,
            fee_waived,
        } => {
            let fee = if *fee_waived {
                "WAIVED".to_string()
            } else {
                format_money(*monthly_fee)
            };
            format!("Overdraft {}, Fee {}", format_money(*overdraft_limit), fee)
        }
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
