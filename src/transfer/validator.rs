//! Input validation for the three transfer variants
//!
//! Everything here is a pure function of the request: no account is read and
//! no balance is touched until validation has passed.

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use super::types::{Destination, TransferRequest, ValidatedTransfer};

/// Maximum fractional digits accepted on an amount
const MAX_AMOUNT_SCALE: u32 = 2;

/// Minimum digits for an external account number
const MIN_ACCOUNT_NUMBER_DIGITS: usize = 4;

/// Minimum digits for a peer phone number
const MIN_PHONE_DIGITS: usize = 7;

/// Transfer request validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount is not a decimal number")]
    AmountNotNumeric,

    #[error("amount must be positive")]
    AmountNotPositive,

    #[error("amount supports at most {max} fractional digits, got {actual}")]
    AmountPrecision { max: u32, actual: u32 },

    #[error("source and destination accounts are the same")]
    SelfTransfer,

    #[error("currency mismatch: source is {source_currency}, destination is {destination}")]
    CurrencyMismatch { source_currency: String, destination: String },

    #[error("account is {0}")]
    AccountNotActive(&'static str),

    #[error("routing number must be exactly 9 digits")]
    RoutingNumberFormat,

    #[error("account number must be numeric with at least {min} digits")]
    AccountNumberFormat { min: usize },

    #[error("recipient name must not be empty")]
    RecipientNameEmpty,

    #[error("invalid email address")]
    EmailFormat,

    #[error("invalid phone number")]
    PhoneFormat,

    #[error("exactly one of email or phone is required")]
    PeerContactAmbiguous,
}

impl ValidationError {
    /// External-descriptor failures are surfaced as their own error class
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            ValidationError::RoutingNumberFormat
                | ValidationError::AccountNumberFormat { .. }
                | ValidationError::RecipientNameEmpty
        )
    }
}

/// Type-specific request validation
pub struct TransferValidator;

impl TransferValidator {
    /// Validate a request, parsing the amount
    ///
    /// Shape checks only; owner, currency and status resolution of the
    /// accounts involved happens later, under the orchestrator's locks.
    pub fn validate(req: &TransferRequest) -> Result<ValidatedTransfer, ValidationError> {
        let amount = Self::parse_amount(&req.amount)?;

        match &req.destination {
            Destination::Internal {
                destination_account_id,
            } => {
                if *destination_account_id == req.source_account_id {
                    return Err(ValidationError::SelfTransfer);
                }
            }
            Destination::External {
                routing_number,
                account_number,
                recipient_name,
            } => {
                Self::check_routing_number(routing_number)?;
                Self::check_account_number(account_number)?;
                if recipient_name.trim().is_empty() {
                    return Err(ValidationError::RecipientNameEmpty);
                }
            }
            Destination::P2p { email, phone } => match (email, phone) {
                (Some(email), None) => Self::check_email(email)?,
                (None, Some(phone)) => Self::check_phone(phone)?,
                _ => return Err(ValidationError::PeerContactAmbiguous),
            },
        }

        Ok(ValidatedTransfer {
            source_account_id: req.source_account_id,
            amount,
            destination: req.destination.clone(),
            description: req.description.clone(),
            client_ref: req.client_ref.clone(),
        })
    }

    /// Parse an amount string into a positive fixed-point value
    pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
        let amount =
            Decimal::from_str(raw.trim()).map_err(|_| ValidationError::AmountNotNumeric)?;

        if amount <= Decimal::ZERO {
            return Err(ValidationError::AmountNotPositive);
        }

        // normalize() drops trailing zeros, so "60.00" passes and "0.001" fails
        let amount = amount.normalize();
        if amount.scale() > MAX_AMOUNT_SCALE {
            return Err(ValidationError::AmountPrecision {
                max: MAX_AMOUNT_SCALE,
                actual: amount.scale(),
            });
        }

        Ok(amount)
    }

    fn check_routing_number(routing_number: &str) -> Result<(), ValidationError> {
        if routing_number.len() == 9 && routing_number.chars().all(|c| c.is_ascii_digit()) {
            Ok(())
        } else {
            Err(ValidationError::RoutingNumberFormat)
        }
    }

    fn check_account_number(account_number: &str) -> Result<(), ValidationError> {
        if account_number.len() >= MIN_ACCOUNT_NUMBER_DIGITS
            && account_number.chars().all(|c| c.is_ascii_digit())
        {
            Ok(())
        } else {
            Err(ValidationError::AccountNumberFormat {
                min: MIN_ACCOUNT_NUMBER_DIGITS,
            })
        }
    }

    fn check_email(email: &str) -> Result<(), ValidationError> {
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ValidationError::EmailFormat),
        }
    }

    fn check_phone(phone: &str) -> Result<(), ValidationError> {
        let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
        let valid_chars = phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' '));

        if valid_chars && digits >= MIN_PHONE_DIGITS {
            Ok(())
        } else {
            Err(ValidationError::PhoneFormat)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn external_request(routing: &str, account: &str, name: &str) -> TransferRequest {
        TransferRequest {
            source_account_id: Uuid::new_v4(),
            amount: "50.00".to_string(),
            description: None,
            client_ref: None,
            destination: Destination::External {
                routing_number: routing.to_string(),
                account_number: account.to_string(),
                recipient_name: name.to_string(),
            },
        }
    }

    fn p2p_request(email: Option<&str>, phone: Option<&str>) -> TransferRequest {
        TransferRequest {
            source_account_id: Uuid::new_v4(),
            amount: "25".to_string(),
            description: None,
            client_ref: None,
            destination: Destination::P2p {
                email: email.map(str::to_string),
                phone: phone.map(str::to_string),
            },
        }
    }

    // ========================================================================
    // Amount
    // ========================================================================

    #[test]
    fn test_amount_valid() {
        assert!(TransferValidator::parse_amount("200").is_ok());
        assert!(TransferValidator::parse_amount("49.99").is_ok());
        assert!(TransferValidator::parse_amount("60.00").is_ok());
        assert!(TransferValidator::parse_amount(" 1.50 ").is_ok());
    }

    #[test]
    fn test_amount_not_numeric() {
        assert_eq!(
            TransferValidator::parse_amount("abc"),
            Err(ValidationError::AmountNotNumeric)
        );
        assert_eq!(
            TransferValidator::parse_amount(""),
            Err(ValidationError::AmountNotNumeric)
        );
    }

    #[test]
    fn test_amount_not_positive() {
        assert_eq!(
            TransferValidator::parse_amount("0"),
            Err(ValidationError::AmountNotPositive)
        );
        assert_eq!(
            TransferValidator::parse_amount("0.00"),
            Err(ValidationError::AmountNotPositive)
        );
        assert_eq!(
            TransferValidator::parse_amount("-5"),
            Err(ValidationError::AmountNotPositive)
        );
    }

    #[test]
    fn test_amount_too_precise() {
        assert!(matches!(
            TransferValidator::parse_amount("0.001"),
            Err(ValidationError::AmountPrecision { .. })
        ));
        assert!(matches!(
            TransferValidator::parse_amount("10.555"),
            Err(ValidationError::AmountPrecision { .. })
        ));
    }

    // ========================================================================
    // Internal
    // ========================================================================

    #[test]
    fn test_internal_self_transfer_rejected() {
        let source = Uuid::new_v4();
        let req = TransferRequest {
            source_account_id: source,
            amount: "10".to_string(),
            description: None,
            client_ref: None,
            destination: Destination::Internal {
                destination_account_id: source,
            },
        };
        assert_eq!(
            TransferValidator::validate(&req).unwrap_err(),
            ValidationError::SelfTransfer
        );
    }

    #[test]
    fn test_internal_valid() {
        let req = TransferRequest {
            source_account_id: Uuid::new_v4(),
            amount: "200".to_string(),
            description: None,
            client_ref: None,
            destination: Destination::Internal {
                destination_account_id: Uuid::new_v4(),
            },
        };
        let validated = TransferValidator::validate(&req).unwrap();
        assert_eq!(validated.amount, Decimal::from(200));
    }

    // ========================================================================
    // External
    // ========================================================================

    #[test]
    fn test_routing_number_nine_digits_accepted() {
        let req = external_request("123456789", "4567", "J. Doe");
        assert!(TransferValidator::validate(&req).is_ok());
    }

    #[test]
    fn test_routing_number_eight_digits_rejected() {
        let req = external_request("12345678", "4567", "J. Doe");
        assert_eq!(
            TransferValidator::validate(&req).unwrap_err(),
            ValidationError::RoutingNumberFormat
        );
    }

    #[test]
    fn test_routing_number_non_digit_rejected() {
        let req = external_request("12345678a", "4567", "J. Doe");
        assert_eq!(
            TransferValidator::validate(&req).unwrap_err(),
            ValidationError::RoutingNumberFormat
        );
    }

    #[test]
    fn test_account_number_too_short_rejected() {
        let req = external_request("123456789", "456", "J. Doe");
        assert!(matches!(
            TransferValidator::validate(&req).unwrap_err(),
            ValidationError::AccountNumberFormat { .. }
        ));
    }

    #[test]
    fn test_recipient_name_empty_rejected() {
        let req = external_request("123456789", "4567", "   ");
        assert_eq!(
            TransferValidator::validate(&req).unwrap_err(),
            ValidationError::RecipientNameEmpty
        );
    }

    #[test]
    fn test_external_errors_are_external_class() {
        assert!(ValidationError::RoutingNumberFormat.is_external());
        assert!(ValidationError::AccountNumberFormat { min: 4 }.is_external());
        assert!(ValidationError::RecipientNameEmpty.is_external());
        assert!(!ValidationError::AmountNotPositive.is_external());
        assert!(!ValidationError::SelfTransfer.is_external());
    }

    // ========================================================================
    // P2P
    // ========================================================================

    #[test]
    fn test_p2p_email_valid() {
        assert!(TransferValidator::validate(&p2p_request(Some("peer@example.com"), None)).is_ok());
    }

    #[test]
    fn test_p2p_email_missing_at_rejected() {
        assert_eq!(
            TransferValidator::validate(&p2p_request(Some("peer.example.com"), None)).unwrap_err(),
            ValidationError::EmailFormat
        );
    }

    #[test]
    fn test_p2p_phone_valid() {
        assert!(TransferValidator::validate(&p2p_request(None, Some("+1 (415) 555-0134"))).is_ok());
    }

    #[test]
    fn test_p2p_phone_invalid() {
        assert_eq!(
            TransferValidator::validate(&p2p_request(None, Some("555-CALL"))).unwrap_err(),
            ValidationError::PhoneFormat
        );
        assert_eq!(
            TransferValidator::validate(&p2p_request(None, Some("12345"))).unwrap_err(),
            ValidationError::PhoneFormat
        );
    }

    #[test]
    fn test_p2p_requires_exactly_one_contact() {
        assert_eq!(
            TransferValidator::validate(&p2p_request(None, None)).unwrap_err(),
            ValidationError::PeerContactAmbiguous
        );
        assert_eq!(
            TransferValidator::validate(&p2p_request(
                Some("peer@example.com"),
                Some("4155550134")
            ))
            .unwrap_err(),
            ValidationError::PeerContactAmbiguous
        );
    }
}
