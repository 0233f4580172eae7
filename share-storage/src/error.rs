//! Storage error types.
//!
//! "Not found" is never an error here: lookups return `Option`/`bool`.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The database could not be opened or its schema could not be created.
    #[error("Connection error: {0}")]
    Connection(String),
    /// A message with this token is already stored; the existing row was left untouched.
    #[error("Message token already exists")]
    DuplicateToken,
    /// The store was disconnected before the operation started.
    #[error("Store is closed")]
    Closed,
    /// A stored value could not be mapped back into the model.
    #[error("Corrupt row: {0}")]
    Corrupt(String),
    #[error("Migration error: {0}")]
    Migration(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::Database(e.to_string())
    }
}
