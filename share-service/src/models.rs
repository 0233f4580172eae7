//! Request and response shapes exchanged with a front end.

use serde::{Deserialize, Serialize};

/// Form data of a "save" request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    pub user_token: String,
    pub message_data: String,
    /// Requested time-to-live in minutes; `None` uses the identity's ceiling.
    #[serde(default)]
    pub retention: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedMessage {
    pub message_token: String,
    pub expire_timestamp: i64,
    pub share_url: String,
}

/// Result of a consume request. Missing and expired messages both map to `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ConsumeResponse {
    Ok { message: String },
    NotFound,
}

impl ConsumeResponse {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"status":"not-found"}"#.to_string())
    }
}

/// Limits shown on the public index page (those of the default identity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicLimits {
    pub message_limit_bytes: u32,
    pub retention_limit_minutes: u32,
}
