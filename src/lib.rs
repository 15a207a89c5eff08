//! Concierge Core - Funds-Transfer Engine
//!
//! The balance-mutation core of the Concierge private-banking backend.
//! Money is never created or destroyed, balances never go negative, and
//! every mutation is owner-checked and committed atomically.
//!
//! # Modules
//!
//! - [`account`] - Customer accounts and the balance ledger
//! - [`transfer`] - Transfer validation, orchestration and records
//! - [`transaction`] - Append-only debit/credit journal
//! - [`notification`] - Best-effort notification dispatch
//! - [`storage`] - PostgreSQL connection management
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing subscriber setup

pub mod account;
pub mod config;
pub mod logging;
pub mod notification;
pub mod storage;
pub mod transaction;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{Account, AccountLedger, AccountStatus, LedgerError};
pub use config::{AppConfig, DatabaseConfig};
pub use notification::{NoopDispatcher, NotificationDispatcher, PgNotificationDispatcher};
pub use storage::Database;
pub use transaction::{Direction, TransactionRecord, TransactionRecorder};
pub use transfer::{
    Destination, Transfer, TransferError, TransferOrchestrator, TransferRequest, TransferStatus,
    TransferType, TransferValidator, ValidationError, error_codes,
};
