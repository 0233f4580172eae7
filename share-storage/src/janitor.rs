//! Expiry janitor: background task purging messages whose time-to-live elapsed.
//!
//! Purges once on start, then once per interval. Stops when the cancellation
//! token fires or the store is closed; a purge already running is allowed to
//! finish.

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::error::StorageError;
use crate::store::ShareStore;

/// Default time between two purges.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub struct ExpiryJanitor {
    store: ShareStore,
    interval: Duration,
}

impl ExpiryJanitor {
    pub fn new(store: ShareStore, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Spawns [`run`](Self::run) on the current tokio runtime.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<Result<(), StorageError>> {
        tokio::spawn(self.run(cancel))
    }

    /// Runs until cancelled or the store closes. A storage failure ends the loop with that error.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), StorageError> {
        info!(interval_secs = self.interval.as_secs(), "Expiry janitor started");

        loop {
            if cancel.is_cancelled() || !self.store.is_open() {
                break;
            }

            match self.sweep().await {
                Ok(()) => {}
                Err(StorageError::Closed) => break,
                Err(e) => {
                    error!(error = %e, "Expiry sweep failed");
                    return Err(e);
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("Expiry janitor stopped");
        Ok(())
    }

    async fn sweep(&self) -> Result<(), StorageError> {
        let now = Utc::now().timestamp();
        let removed = self.store.clear_expired_messages(now).await?;
        if removed > 0 {
            info!(removed, "Purged expired messages");
        } else {
            debug!("No expired messages");
        }
        Ok(())
    }
}
