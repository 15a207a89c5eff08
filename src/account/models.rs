//! Data models for customer accounts

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Account status
///
/// Stored in PostgreSQL as SMALLINT. Only active accounts may be debited
/// or credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i16)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active = 1,
    Frozen = 2,
    Closed = 3,
}

impl AccountStatus {
    /// Get the numeric status ID for PostgreSQL storage
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// Convert from PostgreSQL status ID
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(AccountStatus::Active),
            2 => Some(AccountStatus::Frozen),
            3 => Some(AccountStatus::Closed),
            _ => None,
        }
    }

    /// Get human-readable status name
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Frozen => "frozen",
            AccountStatus::Closed => "closed",
        }
    }
}

impl TryFrom<i16> for AccountStatus {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        AccountStatus::from_id(value).ok_or_else(|| format!("Invalid account status: {}", value))
    }
}

/// Customer account
///
/// The balance is a fixed-point decimal and is mutated only through
/// [`super::AccountLedger`]; `version` and `updated_at` move in the same
/// atomic statement as every balance change.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub account_number: String,
    pub balance: Decimal,
    pub currency: String,
    #[sqlx(try_from = "i16")]
    pub status: AccountStatus,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_id_roundtrip() {
        for status in [
            AccountStatus::Active,
            AccountStatus::Frozen,
            AccountStatus::Closed,
        ] {
            assert_eq!(AccountStatus::from_id(status.id()), Some(status));
        }
    }

    #[test]
    fn test_invalid_status_id() {
        assert!(AccountStatus::from_id(0).is_none());
        assert!(AccountStatus::from_id(99).is_none());
        assert!(AccountStatus::try_from(99i16).is_err());
    }

    #[test]
    fn test_is_active() {
        let account = Account {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            account_number: "100000000001".to_string(),
            balance: Decimal::ZERO,
            currency: "USD".to_string(),
            status: AccountStatus::Frozen,
            version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(!account.is_active());
    }
}
