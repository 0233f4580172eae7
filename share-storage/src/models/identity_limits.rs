//! Per-identity ceilings stored in the `identities` table.

use serde::{Deserialize, Serialize};

/// Limits attached to one identity. Zero means "unlimited" for every field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityLimits {
    /// Longest time-to-live (minutes) a message may request.
    pub retention_limit_minutes: u32,
    /// Largest accepted payload in bytes.
    pub max_size_bytes: u32,
    /// Minimum spacing (minutes) between two creations.
    pub creation_limit_minutes: u32,
}

impl IdentityLimits {
    pub fn new(retention_limit_minutes: u32, max_size_bytes: u32, creation_limit_minutes: u32) -> Self {
        Self {
            retention_limit_minutes,
            max_size_bytes,
            creation_limit_minutes,
        }
    }

    /// Builds limits from raw column values, rejecting negative or oversized numbers.
    pub(crate) fn from_columns(retention: i64, max_size: i64, creation: i64) -> Result<Self, String> {
        let column = |name: &str, value: i64| {
            u32::try_from(value).map_err(|_| format!("{} out of range: {}", name, value))
        };
        Ok(Self {
            retention_limit_minutes: column("retention_limit_minutes", retention)?,
            max_size_bytes: column("max_size_bytes", max_size)?,
            creation_limit_minutes: column("message_creation_limit_minutes", creation)?,
        })
    }
}
