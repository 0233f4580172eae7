//! Data models for storage (messages, identity limits, creation throttling).
//!
//! Used by the repositories and callers of the store facade.

mod creation_slot;
mod identity_limits;
mod message_record;

pub use creation_slot::{remaining_wait_minutes, CreationSlot};
pub use identity_limits::IdentityLimits;
pub use message_record::MessageRecord;
