// In-memory registries. Everything lives for the lifetime of the process.
mod accounts;
mod customers;
mod transactions;

pub use accounts::*;
pub use customers::*;
pub use transactions::*;
