//! Data models for the transaction journal

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Entry direction, stored as SMALLINT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i16)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Debit = 1,
    Credit = 2,
}

impl Direction {
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(Direction::Debit),
            2 => Some(Direction::Credit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Debit => "debit",
            Direction::Credit => "credit",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i16> for Direction {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Direction::from_id(value).ok_or_else(|| format!("Invalid direction: {}", value))
    }
}

/// One immutable journal entry
///
/// Appended inside the transfer commit and never updated or deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    #[sqlx(try_from = "i16")]
    pub direction: Direction,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}
