//! Store facade: the single guarded handle over messages, identities and the
//! schema version.
//!
//! Every public operation takes one exclusive lock for its whole duration, so
//! all saves, consumes and purges happen in a strict total order. Together with
//! the single pooled connection this is what makes consume exactly-once and
//! save no-overwrite.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, instrument};

use crate::error::StorageError;
use crate::identity_repo::IdentityRepository;
use crate::message_repo::MessageRepository;
use crate::models::{CreationSlot, IdentityLimits, MessageRecord};
use crate::sqlite_pool::SqlitePoolManager;
use crate::version_repo::VersionRepository;

/// Shared handle to the one-time-share database. Cheap to clone; clones share the lock.
#[derive(Clone)]
pub struct ShareStore {
    pool_manager: SqlitePoolManager,
    lock: Arc<Mutex<()>>,
    messages: MessageRepository,
    identities: IdentityRepository,
    versions: VersionRepository,
}

impl ShareStore {
    /// Opens (or creates) the database at `path` and creates missing tables.
    pub async fn connect(path: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(path)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let store = Self {
            messages: MessageRepository::new(pool_manager.clone()),
            identities: IdentityRepository::new(pool_manager.clone()),
            versions: VersionRepository::new(pool_manager.clone()),
            lock: Arc::new(Mutex::new(())),
            pool_manager,
        };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        let schema = async {
            self.versions.init().await?;
            self.identities.init().await?;
            self.messages.init().await
        };
        schema
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        info!("Database tables created successfully");
        Ok(())
    }

    /// Acquires the store lock, failing if the store has been disconnected.
    async fn acquire(&self) -> Result<MutexGuard<'_, ()>, StorageError> {
        let guard = self.lock.lock().await;
        if self.pool_manager.is_closed() {
            return Err(StorageError::Closed);
        }
        Ok(guard)
    }

    /// Closes the connection once in-flight operations finish. Idempotent.
    pub async fn disconnect(&self) {
        let _guard = self.lock.lock().await;
        if !self.pool_manager.is_closed() {
            self.pool_manager.close().await;
            info!("Database connection closed");
        }
    }

    pub fn is_open(&self) -> bool {
        !self.pool_manager.is_closed()
    }

    // ---- messages ----

    /// Stores a new message. Fails with [`StorageError::DuplicateToken`] if the token is taken.
    #[instrument(skip_all)]
    pub async fn save_message(
        &self,
        message_token: &str,
        expire_timestamp: i64,
        data: &str,
    ) -> Result<(), StorageError> {
        let _guard = self.acquire().await?;
        self.messages
            .save(&MessageRecord::new(message_token, expire_timestamp, data))
            .await
    }

    /// Removes and returns the message. Only one caller ever gets `Some` for a token.
    ///
    /// The stored expiry is returned as-is; deciding whether the payload is still
    /// live is up to the caller (see [`MessageRecord::is_live_at`]).
    #[instrument(skip_all)]
    pub async fn consume_message(&self, message_token: &str) -> Result<Option<MessageRecord>, StorageError> {
        let _guard = self.acquire().await?;
        self.messages.consume(message_token).await
    }

    /// Deletes messages with `0 < expire_timestamp <= now`. Returns the number removed.
    #[instrument(skip(self))]
    pub async fn clear_expired_messages(&self, now: i64) -> Result<u64, StorageError> {
        let _guard = self.acquire().await?;
        self.messages.clear_expired(now).await
    }

    // ---- identities ----

    pub async fn set_limits(&self, token: &str, limits: IdentityLimits) -> Result<(), StorageError> {
        let _guard = self.acquire().await?;
        self.identities.set_limits(token, limits).await
    }

    /// `None` when the identity does not exist. All-zero limits mean "unlimited", not "missing".
    pub async fn get_limits(&self, token: &str) -> Result<Option<IdentityLimits>, StorageError> {
        let _guard = self.acquire().await?;
        self.identities.get_limits(token).await
    }

    pub async fn identity_exists(&self, token: &str) -> Result<bool, StorageError> {
        let _guard = self.acquire().await?;
        self.identities.exists(token).await
    }

    pub async fn remove_identity(&self, token: &str) -> Result<(), StorageError> {
        let _guard = self.acquire().await?;
        self.identities.remove(token).await
    }

    pub async fn record_creation_timestamp(&self, token: &str, timestamp: i64) -> Result<(), StorageError> {
        let _guard = self.acquire().await?;
        self.identities.record_creation(token, timestamp).await
    }

    /// 0 if the identity is missing or has never created a message.
    pub async fn last_creation_timestamp(&self, token: &str) -> Result<i64, StorageError> {
        let _guard = self.acquire().await?;
        self.identities.last_creation(token).await
    }

    /// Atomic form of "check the creation-rate limit, then record `now`".
    ///
    /// Two concurrent claims for the same identity cannot both be granted while a
    /// limit is configured.
    pub async fn claim_creation_slot(&self, token: &str, now: i64) -> Result<CreationSlot, StorageError> {
        let _guard = self.acquire().await?;
        self.identities.claim_creation_slot(token, now).await
    }

    // ---- schema version ----

    pub async fn version(&self) -> Result<String, StorageError> {
        let _guard = self.acquire().await?;
        self.versions.get().await
    }

    pub async fn set_version(&self, version: &str) -> Result<(), StorageError> {
        let _guard = self.acquire().await?;
        self.versions.set(version).await
    }
}
