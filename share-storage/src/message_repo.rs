//! Message repository: write-once, read-once secrets.
//!
//! Uses SqlitePoolManager and [`MessageRecord`]. Not locked on its own; callers go
//! through [`crate::ShareStore`], which serializes access.

use crate::error::StorageError;
use crate::models::MessageRecord;
use crate::sqlite_pool::SqlitePoolManager;
use tracing::{debug, info};

#[derive(Clone)]
pub(crate) struct MessageRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageRepository {
    pub(crate) fn new(pool_manager: SqlitePoolManager) -> Self {
        Self { pool_manager }
    }

    pub(crate) async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating messages table if not exist");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER NOT NULL PRIMARY KEY,
                message_token TEXT NOT NULL UNIQUE,
                expire_timestamp INTEGER NOT NULL,
                data TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_messages_expire_timestamp ON messages(expire_timestamp);
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }

    /// Inserts a new message. An existing row with the same token is left untouched
    /// and [`StorageError::DuplicateToken`] is returned.
    pub(crate) async fn save(&self, message: &MessageRecord) -> Result<(), StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO messages (message_token, expire_timestamp, data)
            VALUES (?, ?, ?)
            ON CONFLICT(message_token) DO NOTHING
            "#,
        )
        .bind(&message.message_token)
        .bind(message.expire_timestamp)
        .bind(&message.data)
        .execute(self.pool_manager.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::DuplicateToken);
        }

        debug!(
            expire_timestamp = message.expire_timestamp,
            size_bytes = message.data.len(),
            "Saved message"
        );
        Ok(())
    }

    /// Reads and deletes the message in one transaction. Expiry is reported, not checked.
    pub(crate) async fn consume(&self, message_token: &str) -> Result<Option<MessageRecord>, StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;

        let record = sqlx::query_as::<_, MessageRecord>(
            "SELECT message_token, expire_timestamp, data FROM messages WHERE message_token = ?",
        )
        .bind(message_token)
        .fetch_optional(&mut *tx)
        .await?;

        if record.is_some() {
            sqlx::query("DELETE FROM messages WHERE message_token = ?")
                .bind(message_token)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        debug!(found = record.is_some(), "Consumed message");
        Ok(record)
    }

    /// Deletes every message with `0 < expire_timestamp <= now`; returns how many went.
    pub(crate) async fn clear_expired(&self, now: i64) -> Result<u64, StorageError> {
        let result = sqlx::query(
            "DELETE FROM messages WHERE expire_timestamp != 0 AND expire_timestamp <= ?",
        )
        .bind(now)
        .execute(self.pool_manager.pool())
        .await?;

        Ok(result.rows_affected())
    }
}
