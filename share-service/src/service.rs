//! ShareService: what a front end calls to create and fetch one-time messages.

use chrono::Utc;
use share_core::AppConfig;
use share_storage::{CreationSlot, IdentityLimits, ShareStore, StorageError};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::link::share_url;
use crate::models::{ConsumeResponse, CreateMessageRequest, CreatedMessage, PublicLimits};
use crate::policy::{expire_timestamp, resolve_retention};

/// Identity used by front ends that do not authenticate (the public index page).
pub const DEFAULT_IDENTITY: &str = "default";

/// Current time in epoch seconds.
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

#[derive(Clone)]
pub struct ShareService {
    store: ShareStore,
    public_host: String,
    default_limits: IdentityLimits,
}

impl ShareService {
    pub fn new(store: ShareStore, public_host: impl Into<String>, default_limits: IdentityLimits) -> Self {
        Self {
            store,
            public_host: public_host.into(),
            default_limits,
        }
    }

    pub fn from_config(store: ShareStore, config: &AppConfig) -> Self {
        let default_limits = IdentityLimits::new(
            config.default_retention_limit_minutes,
            config.default_max_message_size_bytes,
            config.default_message_creation_limit_minutes,
        );
        Self::new(store, config.public_host.clone(), default_limits)
    }

    pub fn store(&self) -> &ShareStore {
        &self.store
    }

    /// Writes the configured limits to the [`DEFAULT_IDENTITY`] row.
    pub async fn seed_default_identity(&self) -> Result<(), ServiceError> {
        self.store
            .set_limits(DEFAULT_IDENTITY, self.default_limits)
            .await?;
        info!(
            retention_limit_minutes = self.default_limits.retention_limit_minutes,
            max_size_bytes = self.default_limits.max_size_bytes,
            creation_limit_minutes = self.default_limits.creation_limit_minutes,
            "Default identity limits set"
        );
        Ok(())
    }

    pub fn public_limits(&self) -> PublicLimits {
        PublicLimits {
            message_limit_bytes: self.default_limits.max_size_bytes,
            retention_limit_minutes: self.default_limits.retention_limit_minutes,
        }
    }

    /// Validates the request against the identity's limits and stores the message.
    ///
    /// The creation slot is claimed last, so a rejected request does not count
    /// against the identity's creation rate.
    #[instrument(skip_all)]
    pub async fn create_message(
        &self,
        request: &CreateMessageRequest,
        now: i64,
    ) -> Result<CreatedMessage, ServiceError> {
        if request.user_token.is_empty() {
            return Err(ServiceError::InvalidRequest("user_token is empty".to_string()));
        }

        let limits = self
            .store
            .get_limits(&request.user_token)
            .await?
            .ok_or(ServiceError::IdentityNotFound)?;

        if limits.creation_limit_minutes > 0 {
            let last_creation = self.store.last_creation_timestamp(&request.user_token).await?;
            if let Some(remaining_minutes) = share_storage::remaining_wait_minutes(
                limits.creation_limit_minutes,
                last_creation,
                now,
            ) {
                warn!(remaining_minutes, "Message creation rate limited");
                return Err(ServiceError::RateLimited { remaining_minutes });
            }
        }

        if request.message_data.is_empty() {
            return Err(ServiceError::InvalidRequest("message_data is empty".to_string()));
        }

        let size_bytes = request.message_data.len();
        if limits.max_size_bytes > 0 && size_bytes > limits.max_size_bytes as usize {
            return Err(ServiceError::MessageTooLarge {
                size_bytes,
                max_bytes: limits.max_size_bytes,
            });
        }

        let retention_minutes = resolve_retention(request.retention, limits.retention_limit_minutes)?;

        // A concurrent request may have taken the slot since the check above.
        match self.store.claim_creation_slot(&request.user_token, now).await? {
            CreationSlot::Granted => {}
            CreationSlot::Wait { remaining_minutes } => {
                warn!(remaining_minutes, "Message creation rate limited");
                return Err(ServiceError::RateLimited { remaining_minutes });
            }
            CreationSlot::UnknownIdentity => return Err(ServiceError::IdentityNotFound),
        }

        let message_token = Uuid::new_v4().to_string();
        let expire_timestamp = expire_timestamp(now, retention_minutes);

        match self
            .store
            .save_message(&message_token, expire_timestamp, &request.message_data)
            .await
        {
            Ok(()) => {}
            Err(StorageError::DuplicateToken) => {
                error!("Generated message token collided with a stored one");
                return Err(ServiceError::Internal("can't save message, try again".to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        debug!(expire_timestamp, size_bytes, "Message created");
        Ok(CreatedMessage {
            share_url: share_url(&self.public_host, &message_token),
            message_token,
            expire_timestamp,
        })
    }

    /// Fetches and deletes the message. Missing and expired both yield `NotFound`.
    #[instrument(skip_all)]
    pub async fn consume_message(&self, message_token: &str, now: i64) -> Result<ConsumeResponse, ServiceError> {
        if message_token.is_empty() {
            return Err(ServiceError::InvalidRequest("message_token is empty".to_string()));
        }

        let response = match self.store.consume_message(message_token).await? {
            Some(record) if record.is_live_at(now) => ConsumeResponse::Ok {
                message: record.data,
            },
            Some(_) => {
                debug!("Consumed message had already expired");
                ConsumeResponse::NotFound
            }
            None => ConsumeResponse::NotFound,
        };
        Ok(response)
    }
}
