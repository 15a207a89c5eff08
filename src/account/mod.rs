//! Customer accounts and the balance ledger

pub mod ledger;
pub mod models;

pub use ledger::{AccountLedger, LedgerError};
pub use models::{Account, AccountStatus};
