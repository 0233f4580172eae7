//! Global variables table; currently only holds the schema version.

use crate::error::StorageError;
use crate::migration::LATEST_VERSION;
use crate::sqlite_pool::SqlitePoolManager;
use tracing::info;

const VERSION_KEY: &str = "version";

#[derive(Clone)]
pub(crate) struct VersionRepository {
    pool_manager: SqlitePoolManager,
}

impl VersionRepository {
    pub(crate) fn new(pool_manager: SqlitePoolManager) -> Self {
        Self { pool_manager }
    }

    pub(crate) async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating global_vars table if not exist");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS global_vars (
                name TEXT PRIMARY KEY,
                integer_value INTEGER,
                string_value TEXT
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }

    /// A database without a version row was just created, so it is at the latest version.
    pub(crate) async fn get(&self) -> Result<String, StorageError> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT string_value FROM global_vars WHERE name = ?")
                .bind(VERSION_KEY)
                .fetch_optional(self.pool_manager.pool())
                .await?;

        Ok(row
            .and_then(|(version,)| version)
            .unwrap_or_else(|| LATEST_VERSION.to_string()))
    }

    pub(crate) async fn set(&self, version: &str) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO global_vars (name, string_value) VALUES (?, ?)
            ON CONFLICT(name) DO UPDATE SET string_value = excluded.string_value
            "#,
        )
        .bind(VERSION_KEY)
        .bind(version)
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }
}
