//! # share-cli
//!
//! Command line front end: argument parsing, the long-running `run` command and
//! one-shot administration commands. Config comes from the environment.

pub mod app;
pub mod cli;

pub use app::{open_store, run_admin, run_server};
pub use cli::{Cli, Commands};
