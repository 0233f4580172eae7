//! # share-service
//!
//! Request-level logic for one-time sharing, independent of any transport: identity and
//! limit checks before a message is stored, expiry checks after it is consumed, and the
//! response shapes a front end returns.

mod error;
mod link;
mod models;
mod policy;
mod service;

pub use error::ServiceError;
pub use link::{share_url, token_from_shared_path};
pub use models::{ConsumeResponse, CreateMessageRequest, CreatedMessage, PublicLimits};
pub use policy::{expire_timestamp, resolve_retention};
pub use service::{unix_now, ShareService, DEFAULT_IDENTITY};
