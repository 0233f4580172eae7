//! Identity repository: per-identity limits and the last-creation marker.

use crate::error::StorageError;
use crate::models::{remaining_wait_minutes, CreationSlot, IdentityLimits};
use crate::sqlite_pool::SqlitePoolManager;
use tracing::{debug, info};

#[derive(Clone)]
pub(crate) struct IdentityRepository {
    pool_manager: SqlitePoolManager,
}

impl IdentityRepository {
    pub(crate) fn new(pool_manager: SqlitePoolManager) -> Self {
        Self { pool_manager }
    }

    pub(crate) async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating identities table if not exist");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS identities (
                id INTEGER NOT NULL PRIMARY KEY,
                token TEXT NOT NULL UNIQUE,
                retention_limit_minutes INTEGER NOT NULL,
                max_size_bytes INTEGER NOT NULL,
                message_creation_limit_minutes INTEGER NOT NULL,
                last_message_creation_timestamp INTEGER
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }

    /// Upserts the limits; the last-creation marker of an existing identity is kept.
    pub(crate) async fn set_limits(&self, token: &str, limits: IdentityLimits) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO identities (token, retention_limit_minutes, max_size_bytes, message_creation_limit_minutes)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(token) DO UPDATE SET
                retention_limit_minutes = excluded.retention_limit_minutes,
                max_size_bytes = excluded.max_size_bytes,
                message_creation_limit_minutes = excluded.message_creation_limit_minutes
            "#,
        )
        .bind(token)
        .bind(i64::from(limits.retention_limit_minutes))
        .bind(i64::from(limits.max_size_bytes))
        .bind(i64::from(limits.creation_limit_minutes))
        .execute(self.pool_manager.pool())
        .await?;

        debug!(
            retention_limit_minutes = limits.retention_limit_minutes,
            max_size_bytes = limits.max_size_bytes,
            creation_limit_minutes = limits.creation_limit_minutes,
            "Stored identity limits"
        );
        Ok(())
    }

    pub(crate) async fn get_limits(&self, token: &str) -> Result<Option<IdentityLimits>, StorageError> {
        let row: Option<(i64, i64, i64)> = sqlx::query_as(
            r#"
            SELECT retention_limit_minutes, max_size_bytes, message_creation_limit_minutes
            FROM identities WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool_manager.pool())
        .await?;

        row.map(|(retention, max_size, creation)| {
            IdentityLimits::from_columns(retention, max_size, creation).map_err(StorageError::Corrupt)
        })
        .transpose()
    }

    pub(crate) async fn exists(&self, token: &str) -> Result<bool, StorageError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM identities WHERE token = ?")
            .bind(token)
            .fetch_optional(self.pool_manager.pool())
            .await?;

        Ok(row.is_some())
    }

    pub(crate) async fn remove(&self, token: &str) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM identities WHERE token = ?")
            .bind(token)
            .execute(self.pool_manager.pool())
            .await?;

        debug!(removed = result.rows_affected(), "Removed identity");
        Ok(())
    }

    pub(crate) async fn record_creation(&self, token: &str, timestamp: i64) -> Result<(), StorageError> {
        sqlx::query("UPDATE identities SET last_message_creation_timestamp = ? WHERE token = ?")
            .bind(timestamp)
            .bind(token)
            .execute(self.pool_manager.pool())
            .await?;

        Ok(())
    }

    /// Returns 0 when the identity is missing or never created a message.
    pub(crate) async fn last_creation(&self, token: &str) -> Result<i64, StorageError> {
        let row: Option<(Option<i64>,)> =
            sqlx::query_as("SELECT last_message_creation_timestamp FROM identities WHERE token = ?")
                .bind(token)
                .fetch_optional(self.pool_manager.pool())
                .await?;

        Ok(row.and_then(|(timestamp,)| timestamp).unwrap_or(0))
    }

    /// Checks the creation-rate limit and records `now` in the same transaction.
    pub(crate) async fn claim_creation_slot(&self, token: &str, now: i64) -> Result<CreationSlot, StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;

        let row: Option<(i64, Option<i64>)> = sqlx::query_as(
            r#"
            SELECT message_creation_limit_minutes, last_message_creation_timestamp
            FROM identities WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((creation_limit, last_creation)) = row else {
            return Ok(CreationSlot::UnknownIdentity);
        };
        let creation_limit = u32::try_from(creation_limit).map_err(|_| {
            StorageError::Corrupt(format!(
                "message_creation_limit_minutes out of range: {}",
                creation_limit
            ))
        })?;

        if let Some(remaining_minutes) =
            remaining_wait_minutes(creation_limit, last_creation.unwrap_or(0), now)
        {
            return Ok(CreationSlot::Wait { remaining_minutes });
        }

        sqlx::query("UPDATE identities SET last_message_creation_timestamp = ? WHERE token = ?")
            .bind(now)
            .bind(token)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(CreationSlot::Granted)
    }
}
