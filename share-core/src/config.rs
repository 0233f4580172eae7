//! Environment-driven application configuration.

use std::env;
use std::str::FromStr;

use crate::error::{Result, ShareError};

/// Application config, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// DATABASE_PATH: SQLite file (or `:memory:`).
    pub database_path: String,
    /// LOG_FILE
    pub log_file: String,
    /// PUBLIC_HOST: host used when building share links.
    pub public_host: String,
    /// DEFAULT_RETENTION_LIMIT_MINUTES for the `default` identity (0 = unlimited).
    pub default_retention_limit_minutes: u32,
    /// DEFAULT_MAX_MESSAGE_SIZE_BYTES for the `default` identity (0 = unlimited).
    pub default_max_message_size_bytes: u32,
    /// DEFAULT_MESSAGE_CREATION_LIMIT_MINUTES for the `default` identity (0 = unlimited).
    pub default_message_creation_limit_minutes: u32,
    /// EXPIRY_SWEEP_INTERVAL_SECS between two expiry purges.
    pub expiry_sweep_interval_secs: u64,
}

impl AppConfig {
    /// Load from environment variables; unset values fall back to defaults.
    pub fn load() -> Result<Self> {
        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./one_time_share.db".to_string());
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/one-time-share.log".to_string());
        let public_host = env::var("PUBLIC_HOST").unwrap_or_else(|_| "localhost".to_string());

        Ok(Self {
            database_path,
            log_file,
            public_host,
            default_retention_limit_minutes: parse_var("DEFAULT_RETENTION_LIMIT_MINUTES", 1440)?,
            default_max_message_size_bytes: parse_var("DEFAULT_MAX_MESSAGE_SIZE_BYTES", 4096)?,
            default_message_creation_limit_minutes: parse_var(
                "DEFAULT_MESSAGE_CREATION_LIMIT_MINUTES",
                0,
            )?,
            expiry_sweep_interval_secs: parse_var("EXPIRY_SWEEP_INTERVAL_SECS", 60)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.database_path.trim().is_empty() {
            return Err(ShareError::Config("DATABASE_PATH must not be empty".to_string()));
        }
        if self.expiry_sweep_interval_secs == 0 {
            return Err(ShareError::Config(
                "EXPIRY_SWEEP_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Unset means `default`; a value that does not parse is an error rather than silently ignored.
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            ShareError::Config(format!("{} is not a valid number: {}", name, raw))
        }),
        Err(_) => Ok(default),
    }
}
