//! Service errors. Client-side rejections are separated from failures of the store.

use share_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("User not found")]
    IdentityNotFound,

    #[error("Message creation limit reached. Wait for {remaining_minutes} minute(s) and repeat")]
    RateLimited { remaining_minutes: u32 },

    #[error("Message is too big: {size_bytes} bytes (max {max_bytes})")]
    MessageTooLarge { size_bytes: usize, max_bytes: u32 },

    #[error("Retention not allowed: {0}")]
    RetentionNotAllowed(String),

    /// Something the caller cannot fix, e.g. a generated token colliding with a stored one.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// True for rejections caused by the request itself (a front end answers 4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::InvalidRequest(_)
                | ServiceError::IdentityNotFound
                | ServiceError::RateLimited { .. }
                | ServiceError::MessageTooLarge { .. }
                | ServiceError::RetentionNotAllowed(_)
        )
    }
}
