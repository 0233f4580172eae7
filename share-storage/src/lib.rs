//! Storage crate: durable one-time message store.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – MessageRecord, IdentityLimits, CreationSlot
//! - [`store`] – ShareStore, the single locked facade over all tables
//! - [`migration`] – Schema version upgrades
//! - [`janitor`] – ExpiryJanitor background purge
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod identity_repo;
mod janitor;
mod message_repo;
mod migration;
mod models;
mod sqlite_pool;
mod store;
mod version_repo;


pub use error::StorageError;
pub use janitor::{ExpiryJanitor, DEFAULT_SWEEP_INTERVAL};
pub use migration::{
    migrate, migrate_with, plan_updates, UpdateFuture, Updater, LATEST_VERSION, MINIMAL_VERSION,
};
pub use models::{remaining_wait_minutes, CreationSlot, IdentityLimits, MessageRecord};
pub use sqlite_pool::SqlitePoolManager;
pub use store::ShareStore;
