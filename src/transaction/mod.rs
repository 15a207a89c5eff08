//! Append-only transaction records per account

pub mod models;
pub mod recorder;

pub use models::{Direction, TransactionRecord};
pub use recorder::TransactionRecorder;
