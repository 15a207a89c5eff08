//! Transfer error taxonomy and stable error codes

use thiserror::Error;

use super::validator::ValidationError;
use crate::account::LedgerError;

/// Stable error codes surfaced to callers
pub mod error_codes {
    // Client errors (1xxx)
    pub const VALIDATION: i32 = 1001;
    pub const EXTERNAL_VALIDATION: i32 = 1002;
    pub const INSUFFICIENT_FUNDS: i32 = 1003;

    // Auth errors (2xxx)
    pub const PERMISSION_DENIED: i32 = 2001;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4001;

    // Server errors (5xxx)
    pub const INTERNAL: i32 = 5000;
}

/// Errors surfaced by the transfer engine
///
/// All variants are deterministic and client-caused except `Internal`,
/// which is safe to retry as a whole operation (the commit is atomic, and
/// `client_ref` makes the retry idempotent).
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("{0}")]
    Validation(ValidationError),

    /// Routing/account-number format failures, reported as their own class
    #[error("{0}")]
    ExternalValidation(ValidationError),

    /// Account missing or not owned by the caller; deliberately identical
    /// in both cases
    #[error("account not found")]
    NotFound,

    #[error("permission denied")]
    PermissionDenied,

    #[error("insufficient funds")]
    InsufficientFunds,

    /// Storage failure. The message carries no driver detail; the source
    /// error stays available for logging.
    #[error("internal storage error")]
    Internal(#[source] sqlx::Error),
}

impl TransferError {
    /// Stable numeric code for the caller-facing error envelope
    pub fn code(&self) -> i32 {
        match self {
            TransferError::Validation(_) => error_codes::VALIDATION,
            TransferError::ExternalValidation(_) => error_codes::EXTERNAL_VALIDATION,
            TransferError::NotFound => error_codes::NOT_FOUND,
            TransferError::PermissionDenied => error_codes::PERMISSION_DENIED,
            TransferError::InsufficientFunds => error_codes::INSUFFICIENT_FUNDS,
            TransferError::Internal(_) => error_codes::INTERNAL,
        }
    }
}

impl From<ValidationError> for TransferError {
    fn from(err: ValidationError) -> Self {
        if err.is_external() {
            TransferError::ExternalValidation(err)
        } else {
            TransferError::Validation(err)
        }
    }
}

impl From<LedgerError> for TransferError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound => TransferError::NotFound,
            LedgerError::InsufficientFunds => TransferError::InsufficientFunds,
            LedgerError::NotActive(status) => {
                TransferError::Validation(ValidationError::AccountNotActive(status))
            }
            LedgerError::Database(err) => TransferError::Internal(err),
        }
    }
}

impl From<sqlx::Error> for TransferError {
    fn from(err: sqlx::Error) -> Self {
        TransferError::Internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_validation_gets_own_code() {
        let err = TransferError::from(ValidationError::RoutingNumberFormat);
        assert!(matches!(err, TransferError::ExternalValidation(_)));
        assert_eq!(err.code(), error_codes::EXTERNAL_VALIDATION);

        let err = TransferError::from(ValidationError::AmountNotPositive);
        assert!(matches!(err, TransferError::Validation(_)));
        assert_eq!(err.code(), error_codes::VALIDATION);
    }

    #[test]
    fn test_ledger_error_mapping() {
        assert!(matches!(
            TransferError::from(LedgerError::NotFound),
            TransferError::NotFound
        ));
        assert!(matches!(
            TransferError::from(LedgerError::InsufficientFunds),
            TransferError::InsufficientFunds
        ));
        assert!(matches!(
            TransferError::from(LedgerError::NotActive("frozen")),
            TransferError::Validation(ValidationError::AccountNotActive("frozen"))
        ));
    }

    #[test]
    fn test_internal_error_hides_driver_detail() {
        let err = TransferError::Internal(sqlx::Error::PoolTimedOut);
        assert_eq!(err.to_string(), "internal storage error");
        assert_eq!(err.code(), error_codes::INTERNAL);
    }
}
