//! The funds-transfer engine
//!
//! Validation, orchestration and persistence for the three transfer
//! variants (internal, external, peer-to-peer).

pub mod error;
pub mod orchestrator;
pub mod types;
pub mod validator;

pub use error::{TransferError, error_codes};
pub use orchestrator::TransferOrchestrator;
pub use types::{
    Destination, Transfer, TransferRequest, TransferStatus, TransferType, ValidatedTransfer,
};
pub use validator::{TransferValidator, ValidationError};
