//! Creation-rate throttling outcome and the wait computation shared by callers.

use serde::{Deserialize, Serialize};

/// Result of asking the store for permission to create a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreationSlot {
    /// Creation allowed; the last-creation marker now holds the request time.
    Granted,
    /// Too soon after the previous creation.
    Wait { remaining_minutes: u32 },
    UnknownIdentity,
}

/// Whole minutes the identity still has to wait, or `None` when creation is allowed.
///
/// `last_creation` of 0 means nothing was created yet. Elapsed time is floored to
/// whole minutes, so a limit of 5 checked 200 seconds after the last creation
/// leaves 2 minutes.
pub fn remaining_wait_minutes(creation_limit_minutes: u32, last_creation: i64, now: i64) -> Option<u32> {
    if creation_limit_minutes == 0 || last_creation <= 0 {
        return None;
    }
    let elapsed_secs = now.saturating_sub(last_creation).max(0);
    if elapsed_secs >= i64::from(creation_limit_minutes) * 60 {
        return None;
    }
    // elapsed_secs < limit * 60, so the quotient fits in u32
    let elapsed_minutes = (elapsed_secs / 60) as u32;
    Some(creation_limit_minutes - elapsed_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_three_minutes_into_five_minute_limit() {
        assert_eq!(remaining_wait_minutes(5, 1000, 1200), Some(2));
    }

    #[test]
    fn test_no_wait_without_limit_or_history() {
        assert_eq!(remaining_wait_minutes(0, 1000, 1001), None);
        assert_eq!(remaining_wait_minutes(5, 0, 1001), None);
    }

    #[test]
    fn test_wait_ends_exactly_at_limit() {
        assert_eq!(remaining_wait_minutes(5, 1000, 1299), Some(1));
        assert_eq!(remaining_wait_minutes(5, 1000, 1300), None);
    }

    #[test]
    fn test_clock_going_backwards_waits_full_limit() {
        assert_eq!(remaining_wait_minutes(5, 1000, 900), Some(5));
    }
}
