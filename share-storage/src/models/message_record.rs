//! Message record model for persistence.
//!
//! Maps to the `messages` table and is returned by a successful consume.

use serde::{Deserialize, Serialize};

/// One row from the messages table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRecord {
    /// Caller-generated token embedded in the one-time link.
    pub message_token: String,
    /// Epoch seconds after which the payload is stale; 0 means it never expires.
    pub expire_timestamp: i64,
    /// Secret text payload.
    pub data: String,
}

impl MessageRecord {
    pub fn new(message_token: impl Into<String>, expire_timestamp: i64, data: impl Into<String>) -> Self {
        Self {
            message_token: message_token.into(),
            expire_timestamp,
            data: data.into(),
        }
    }

    /// True when the payload may still be delivered at `now` (epoch seconds).
    pub fn is_live_at(&self, now: i64) -> bool {
        self.expire_timestamp == 0 || now < self.expire_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_live_at() {
        let record = MessageRecord::new("t", 1000, "secret");
        assert!(record.is_live_at(999));
        assert!(!record.is_live_at(1000));
        assert!(!record.is_live_at(5000));

        let forever = MessageRecord::new("t", 0, "secret");
        assert!(forever.is_live_at(i64::MAX));
    }
}
