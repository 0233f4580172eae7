//! SQLite connection pool wrapper for the storage crate.
//!
//! The pool is pinned to exactly one long-lived connection: the store facade
//! serializes every operation, and an in-memory database only lives as long as
//! its connection.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Paths that select a private in-memory database instead of a file.
const IN_MEMORY_PATHS: [&str; 2] = [":memory:", "sqlite::memory:"];

/// Manages a single-connection SQLite pool; creates the DB file if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Opens the database at `database_path` (file path, `:memory:` or `sqlite::memory:`).
    pub async fn new(database_path: &str) -> Result<Self, sqlx::Error> {
        info!(database_path = %database_path, "Initializing SQLite pool");

        let options = if IN_MEMORY_PATHS.contains(&database_path) {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else {
            SqliteConnectOptions::new()
                .create_if_missing(true)
                .filename(database_path)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Closes the pool and waits for the connection to be released.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
