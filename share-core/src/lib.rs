//! # share-core
//!
//! Ambient pieces shared by the one-time-share crates: [`AppConfig`] loaded from the
//! environment, [`ShareError`], and tracing initialization. Transport-agnostic.

pub mod config;
pub mod error;
pub mod logger;

pub use config::AppConfig;
pub use error::{Result, ShareError};
pub use logger::{init_console_tracing, init_tracing};
