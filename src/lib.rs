pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

pub use application::{AppError, BankService, OpenAccountRequest};
pub use config::BankConfig;
pub use domain::*;
