//! Transaction journal writes and reads

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::models::{Direction, TransactionRecord};
use crate::account::{AccountLedger, LedgerError};

const RECORD_COLUMNS: &str = "id, account_id, direction, amount, description, category, created_at";

/// Append-only recorder for debit/credit journal entries
pub struct TransactionRecorder;

impl TransactionRecorder {
    /// Append one journal entry
    ///
    /// Runs on the caller's connection so the entry commits (or rolls back)
    /// together with the balance mutation it justifies.
    pub async fn append(
        conn: &mut PgConnection,
        account_id: Uuid,
        direction: Direction,
        amount: Decimal,
        description: &str,
        category: &str,
    ) -> Result<TransactionRecord, sqlx::Error> {
        let record: TransactionRecord = sqlx::query_as(&format!(
            "INSERT INTO transactions (account_id, direction, amount, description, category)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            RECORD_COLUMNS
        ))
        .bind(account_id)
        .bind(direction.id())
        .bind(amount)
        .bind(description)
        .bind(category)
        .fetch_one(&mut *conn)
        .await?;

        Ok(record)
    }

    /// Ordered history for an account, most-recent first
    ///
    /// Ownership is checked by resolving the account under `owner_id` first,
    /// so one customer can never list another customer's entries.
    pub async fn history(
        pool: &PgPool,
        account_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        AccountLedger::get_account(pool, account_id, owner_id).await?;

        let records: Vec<TransactionRecord> = sqlx::query_as(&format!(
            "SELECT {} FROM transactions
             WHERE account_id = $1
             ORDER BY created_at DESC, id DESC",
            RECORD_COLUMNS
        ))
        .bind(account_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
