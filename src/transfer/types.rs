//! Transfer request and record types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Transfer variant, stored as SMALLINT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i16)]
#[serde(rename_all = "lowercase")]
pub enum TransferType {
    /// Between two accounts of the same customer; settles instantly
    Internal = 1,
    /// To a routing/account number outside this bank
    External = 2,
    /// To a peer identified by email or phone
    P2p = 3,
}

impl TransferType {
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(TransferType::Internal),
            2 => Some(TransferType::External),
            3 => Some(TransferType::P2p),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferType::Internal => "internal",
            TransferType::External => "external",
            TransferType::P2p => "p2p",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i16> for TransferType {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        TransferType::from_id(value).ok_or_else(|| format!("Invalid transfer type: {}", value))
    }
}

/// Transfer status, stored as SMALLINT
///
/// `PendingSettlement` is moved to `Completed` or `Failed` by the external
/// settlement reconciler; the engine itself only ever writes the first two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i16)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Completed = 1,
    PendingSettlement = 2,
    Failed = -1,
}

impl TransferStatus {
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(TransferStatus::Completed),
            2 => Some(TransferStatus::PendingSettlement),
            -1 => Some(TransferStatus::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Completed => "completed",
            TransferStatus::PendingSettlement => "pending_settlement",
            TransferStatus::Failed => "failed",
        }
    }

    /// Check whether settlement is still outstanding
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, TransferStatus::PendingSettlement)
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i16> for TransferStatus {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        TransferStatus::from_id(value).ok_or_else(|| format!("Invalid transfer status: {}", value))
    }
}

/// Where the money goes — exactly one variant, matching the transfer type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transfer_type", rename_all = "lowercase")]
pub enum Destination {
    Internal {
        destination_account_id: Uuid,
    },
    External {
        routing_number: String,
        account_number: String,
        recipient_name: String,
    },
    P2p {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        phone: Option<String>,
    },
}

impl Destination {
    pub fn transfer_type(&self) -> TransferType {
        match self {
            Destination::Internal { .. } => TransferType::Internal,
            Destination::External { .. } => TransferType::External,
            Destination::P2p { .. } => TransferType::P2p,
        }
    }

    /// Short human label used in journal entry descriptions
    pub fn label(&self) -> String {
        match self {
            Destination::Internal { destination_account_id } => {
                destination_account_id.to_string()
            }
            Destination::External { recipient_name, .. } => recipient_name.clone(),
            Destination::P2p { email, phone } => email
                .clone()
                .or_else(|| phone.clone())
                .unwrap_or_else(|| "peer".to_string()),
        }
    }
}

/// Inbound transfer request
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRequest {
    pub source_account_id: Uuid,
    /// Amount as string to avoid float precision issues in JSON
    pub amount: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Client idempotency key; retries with the same key return the
    /// already-recorded transfer instead of moving money twice
    #[serde(default)]
    pub client_ref: Option<String>,
    #[serde(flatten)]
    pub destination: Destination,
}

/// Validation output: the request with its amount parsed
#[derive(Debug, Clone)]
pub struct ValidatedTransfer {
    pub source_account_id: Uuid,
    pub amount: Decimal,
    pub destination: Destination,
    pub description: Option<String>,
    pub client_ref: Option<String>,
}

impl ValidatedTransfer {
    pub fn transfer_type(&self) -> TransferType {
        self.destination.transfer_type()
    }
}

/// Durable transfer record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Transfer {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub source_account_id: Uuid,
    /// Populated for internal transfers only
    pub destination_account_id: Option<Uuid>,
    /// External or peer descriptor for off-system destinations
    pub destination_details: Option<serde_json::Value>,
    #[sqlx(try_from = "i16")]
    pub transfer_type: TransferType,
    pub amount: Decimal,
    #[sqlx(try_from = "i16")]
    pub status: TransferStatus,
    pub description: Option<String>,
    pub client_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}
