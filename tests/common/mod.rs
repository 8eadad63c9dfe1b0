// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use bank_ledger::application::{BankService, OpenAccountRequest};
use bank_ledger::config::BankConfig;
use bank_ledger::domain::{AccountKind, AccountNumber, Cents, CustomerTier, FixedClock, NewCustomer};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Fixed starting instant shared by the integration tests
pub fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

/// Service with default config and a clock that advances one second per reading
pub fn test_service() -> BankService {
    test_service_with(BankConfig::default())
}

pub fn test_service_with(config: BankConfig) -> BankService {
    let clock = FixedClock::new(start()).with_step(Duration::seconds(1));
    BankService::with_clock(config, Box::new(clock))
}

pub fn customer(name: &str, tier: CustomerTier) -> NewCustomer {
    NewCustomer::new(name, 35, "5550001111", "42 Harbour Rd", tier)
}

/// Open an account for a fresh regular customer and return its number
pub fn open(service: &mut BankService, kind: AccountKind, initial: Cents) -> Result<AccountNumber> {
    open_for(service, customer("John Doe", CustomerTier::Regular), kind, initial)
}

pub fn open_for(
    service: &mut BankService,
    customer: NewCustomer,
    kind: AccountKind,
    initial: Cents,
) -> Result<AccountNumber> {
    let opened = service.open_account(OpenAccountRequest {
        customer,
        kind,
        initial_deposit: initial,
    })?;
    Ok(opened.account.account_number)
}

pub fn balance(service: &BankService, number: &AccountNumber) -> Cents {
    service.account(number).unwrap().balance()
}
