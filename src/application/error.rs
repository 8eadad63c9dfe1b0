use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::{format_money, AccountNumber, Cents, CustomerId, TransactionError};

fn money(cents: &Cents) -> String {
    format_money(*cents)
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error("Account with number {0} not found.")]
    AccountNotFound(AccountNumber),

    #[error("Customer with id {0} not found.")]
    CustomerNotFound(CustomerId),

    #[error("Account already registered: {0}")]
    DuplicateAccount(AccountNumber),

    #[error("{registry} limit reached ({capacity})")]
    CapacityExceeded {
        registry: &'static str,
        capacity: usize,
    },

    #[error("Initial deposit of {} is below the required minimum of {}", money(.offered), money(.required))]
    OpeningDepositTooLow { required: Cents, offered: Cents },

    #[error("Invalid customer details: {0}")]
    InvalidCustomer(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
