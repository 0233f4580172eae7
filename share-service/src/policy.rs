//! Retention rules applied before a message is stored.

use crate::error::ServiceError;

/// Picks the message time-to-live in minutes (0 = never expires) for an identity whose
/// retention ceiling is `ceiling_minutes` (0 = unlimited).
///
/// Without a request the ceiling itself is used. An identity with a ceiling can neither
/// ask for an unlimited message nor exceed the ceiling.
pub fn resolve_retention(requested: Option<u32>, ceiling_minutes: u32) -> Result<u32, ServiceError> {
    match requested {
        None => Ok(ceiling_minutes),
        Some(0) if ceiling_minutes > 0 => Err(ServiceError::RetentionNotAllowed(
            "can't set unlimited retention limit".to_string(),
        )),
        Some(minutes) if ceiling_minutes > 0 && minutes > ceiling_minutes => {
            Err(ServiceError::RetentionNotAllowed(format!(
                "requested {} minute(s), allowed at most {}",
                minutes, ceiling_minutes
            )))
        }
        Some(minutes) => Ok(minutes),
    }
}

/// Expiry timestamp for a message created at `now` living `retention_minutes`.
pub fn expire_timestamp(now: i64, retention_minutes: u32) -> i64 {
    if retention_minutes == 0 {
        0
    } else {
        now.saturating_add(i64::from(retention_minutes) * 60)
    }
}
