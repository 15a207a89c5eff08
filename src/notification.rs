//! Notification dispatch
//!
//! The transfer engine treats notification delivery as a best-effort side
//! effect: dispatchers are invoked after (never instead of) a durable
//! commit, and a dispatch failure is logged, never surfaced to the caller.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification store error: {0}")]
    Store(#[from] sqlx::Error),
}

/// Outbound notification collaborator
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn notify(
        &self,
        owner_id: Uuid,
        kind: &str,
        message: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotifyError>;
}

/// Persists notifications to the `notifications` table for in-app display
pub struct PgNotificationDispatcher {
    pool: PgPool,
}

impl PgNotificationDispatcher {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationDispatcher for PgNotificationDispatcher {
    async fn notify(
        &self,
        owner_id: Uuid,
        kind: &str,
        message: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotifyError> {
        sqlx::query(
            "INSERT INTO notifications (owner_id, kind, message, subject, body, delivery_method)
             VALUES ($1, $2, $3, $4, $5, 'email')",
        )
        .bind(owner_id)
        .bind(kind)
        .bind(message)
        .bind(subject)
        .bind(body)
        .execute(&self.pool)
        .await?;

        tracing::info!(%owner_id, kind, "notification logged");
        Ok(())
    }
}

/// Dispatcher that drops everything; for tests and callers that wire
/// delivery elsewhere
pub struct NoopDispatcher;

#[async_trait]
impl NotificationDispatcher for NoopDispatcher {
    async fn notify(
        &self,
        _owner_id: Uuid,
        _kind: &str,
        _message: &str,
        _subject: &str,
        _body: &str,
    ) -> Result<(), NotifyError> {
        Ok(())
    }
}
