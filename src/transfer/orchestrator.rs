//! Transfer orchestration
//!
//! Drives one transfer as a single unit of work:
//! Validating → Authorizing → Debited → {Completed | PendingSettlement},
//! with every failure path leaving no side effects. The debit, the journal
//! entries and the transfer row land in one database commit; the
//! notification runs after, off the commit path.

use std::sync::Arc;

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::error::TransferError;
use super::types::{
    Destination, Transfer, TransferRequest, TransferStatus, ValidatedTransfer,
};
use super::validator::{TransferValidator, ValidationError};
use crate::account::AccountLedger;
use crate::notification::NotificationDispatcher;
use crate::storage::Database;
use crate::transaction::{Direction, TransactionRecord, TransactionRecorder};

const TRANSFER_COLUMNS: &str = "id, owner_id, source_account_id, destination_account_id, \
     destination_details, transfer_type, amount, status, description, client_ref, created_at";

/// Journal category for entries written by the transfer engine
const CATEGORY_TRANSFER: &str = "transfer";

/// Executes transfers against the ledger
pub struct TransferOrchestrator {
    db: Arc<Database>,
    notifier: Arc<dyn NotificationDispatcher>,
}

impl TransferOrchestrator {
    pub fn new(db: Arc<Database>, notifier: Arc<dyn NotificationDispatcher>) -> Self {
        Self { db, notifier }
    }

    /// Capability check at entry
    ///
    /// The auth boundary supplies the caller's owner id; the engine never
    /// re-derives identity. Every subsequent account lookup reuses this id.
    fn authorize(owner_id: Uuid) -> Result<Uuid, TransferError> {
        if owner_id.is_nil() {
            return Err(TransferError::PermissionDenied);
        }
        Ok(owner_id)
    }

    /// Execute a transfer for the authenticated owner
    pub async fn execute(
        &self,
        owner_id: Uuid,
        req: TransferRequest,
    ) -> Result<Transfer, TransferError> {
        // Validating: pure shape checks, no side effects on failure
        let validated = TransferValidator::validate(&req)?;

        // Authorizing
        let owner_id = Self::authorize(owner_id)?;
        let pool = self.db.pool();

        // Idempotency: a retry with the same client_ref must not move money twice
        if let Some(client_ref) = validated.client_ref.as_deref() {
            if let Some(existing) = Self::find_by_client_ref(pool, owner_id, client_ref).await? {
                tracing::info!(
                    transfer_id = %existing.id,
                    client_ref,
                    "transfer already recorded for client_ref, returning existing"
                );
                return Ok(existing);
            }
        }

        let mut tx = pool.begin().await?;

        // Authorizing: resolve and lock the source under the caller. An
        // ownership mismatch reads as NotFound, same as a missing account.
        let source =
            AccountLedger::lock_account(&mut tx, validated.source_account_id, owner_id).await?;

        // Debited: atomic check-and-decrement under the held row lock
        AccountLedger::debit(&mut tx, source.id, owner_id, validated.amount).await?;

        let transfer = match validated.destination.clone() {
            Destination::Internal {
                destination_account_id,
            } => {
                let destination =
                    AccountLedger::lock_account(&mut tx, destination_account_id, owner_id).await?;
                if !destination.is_active() {
                    return Err(TransferError::Validation(ValidationError::AccountNotActive(
                        destination.status.as_str(),
                    )));
                }
                if destination.currency != source.currency {
                    return Err(TransferError::Validation(ValidationError::CurrencyMismatch {
                        source_currency: source.currency.clone(),
                        destination: destination.currency.clone(),
                    }));
                }

                AccountLedger::credit(&mut tx, destination.id, validated.amount).await?;

                let debit_description = validated
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("Transfer to {}", destination.account_number));
                TransactionRecorder::append(
                    &mut tx,
                    source.id,
                    Direction::Debit,
                    validated.amount,
                    &debit_description,
                    CATEGORY_TRANSFER,
                )
                .await?;

                let credit_description = format!("Transfer from {}", source.account_number);
                TransactionRecorder::append(
                    &mut tx,
                    destination.id,
                    Direction::Credit,
                    validated.amount,
                    &credit_description,
                    CATEGORY_TRANSFER,
                )
                .await?;

                Self::insert_transfer(&mut tx, owner_id, &validated, TransferStatus::Completed)
                    .await?
            }
            destination @ (Destination::External { .. } | Destination::P2p { .. }) => {
                // Destination is off-system: no credit here, settlement is
                // simulated by the pending status
                let debit_description = validated
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("Transfer to {}", destination.label()));
                TransactionRecorder::append(
                    &mut tx,
                    source.id,
                    Direction::Debit,
                    validated.amount,
                    &debit_description,
                    CATEGORY_TRANSFER,
                )
                .await?;

                Self::insert_transfer(
                    &mut tx,
                    owner_id,
                    &validated,
                    TransferStatus::PendingSettlement,
                )
                .await?
            }
        };

        // One atomic commit for debit + journal entries + transfer row.
        // Every error path above drops the transaction, rolling all of it back.
        tx.commit().await?;

        tracing::info!(
            transfer_id = %transfer.id,
            owner_id = %owner_id,
            amount = %transfer.amount,
            transfer_type = %transfer.transfer_type,
            status = %transfer.status,
            "transfer committed"
        );

        self.dispatch_notification(&transfer);

        Ok(transfer)
    }

    /// Ordered transaction history for one of the owner's accounts
    pub async fn history(
        &self,
        owner_id: Uuid,
        account_id: Uuid,
    ) -> Result<Vec<TransactionRecord>, TransferError> {
        let owner_id = Self::authorize(owner_id)?;
        let records = TransactionRecorder::history(self.db.pool(), account_id, owner_id).await?;
        Ok(records)
    }

    /// Look up a transfer, only if it belongs to the caller
    pub async fn get_transfer(
        &self,
        owner_id: Uuid,
        transfer_id: Uuid,
    ) -> Result<Transfer, TransferError> {
        let owner_id = Self::authorize(owner_id)?;

        let transfer: Option<Transfer> = sqlx::query_as(&format!(
            "SELECT {} FROM transfers WHERE id = $1 AND owner_id = $2",
            TRANSFER_COLUMNS
        ))
        .bind(transfer_id)
        .bind(owner_id)
        .fetch_optional(self.db.pool())
        .await?;

        transfer.ok_or(TransferError::NotFound)
    }

    async fn find_by_client_ref(
        pool: &PgPool,
        owner_id: Uuid,
        client_ref: &str,
    ) -> Result<Option<Transfer>, TransferError> {
        let transfer: Option<Transfer> = sqlx::query_as(&format!(
            "SELECT {} FROM transfers WHERE owner_id = $1 AND client_ref = $2",
            TRANSFER_COLUMNS
        ))
        .bind(owner_id)
        .bind(client_ref)
        .fetch_optional(pool)
        .await?;

        Ok(transfer)
    }

    async fn insert_transfer(
        conn: &mut PgConnection,
        owner_id: Uuid,
        validated: &ValidatedTransfer,
        status: TransferStatus,
    ) -> Result<Transfer, TransferError> {
        let (destination_account_id, destination_details) = match &validated.destination {
            Destination::Internal {
                destination_account_id,
            } => (Some(*destination_account_id), None),
            Destination::External {
                routing_number,
                account_number,
                recipient_name,
            } => (
                None,
                Some(serde_json::json!({
                    "routing_number": routing_number,
                    "account_number": account_number,
                    "recipient_name": recipient_name,
                })),
            ),
            Destination::P2p { email, phone } => {
                let mut details = serde_json::Map::new();
                if let Some(email) = email {
                    details.insert("email".to_string(), email.clone().into());
                }
                if let Some(phone) = phone {
                    details.insert("phone".to_string(), phone.clone().into());
                }
                (None, Some(serde_json::Value::Object(details)))
            }
        };

        let transfer: Transfer = sqlx::query_as(&format!(
            "INSERT INTO transfers
                (owner_id, source_account_id, destination_account_id, destination_details,
                 transfer_type, amount, status, description, client_ref)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {}",
            TRANSFER_COLUMNS
        ))
        .bind(owner_id)
        .bind(validated.source_account_id)
        .bind(destination_account_id)
        .bind(destination_details)
        .bind(validated.transfer_type().id())
        .bind(validated.amount)
        .bind(status.id())
        .bind(&validated.description)
        .bind(&validated.client_ref)
        .fetch_one(&mut *conn)
        .await?;

        Ok(transfer)
    }

    /// Fire-and-forget confirmation, decoupled from the commit path
    ///
    /// Invoked only after a durable commit; a dispatch failure is logged
    /// and never surfaced as a transfer failure.
    fn dispatch_notification(&self, transfer: &Transfer) {
        let notifier = Arc::clone(&self.notifier);
        let owner_id = transfer.owner_id;
        let transfer_id = transfer.id;
        let message = match transfer.status {
            TransferStatus::PendingSettlement => {
                format!("Transfer of ${:.2} submitted for settlement", transfer.amount)
            }
            _ => format!("Transfer of ${:.2} completed", transfer.amount),
        };

        tokio::spawn(async move {
            if let Err(err) = notifier
                .notify(
                    owner_id,
                    "transfer",
                    &message,
                    "Transfer Confirmation",
                    &message,
                )
                .await
            {
                tracing::warn!(
                    %owner_id,
                    %transfer_id,
                    error = %err,
                    "notification dispatch failed"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_rejects_nil_owner() {
        let result = TransferOrchestrator::authorize(Uuid::nil());
        assert!(matches!(result, Err(TransferError::PermissionDenied)));
    }

    #[test]
    fn test_authorize_passes_owner_through() {
        let owner = Uuid::new_v4();
        assert_eq!(TransferOrchestrator::authorize(owner).unwrap(), owner);
    }
}
