//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "one-time-share")]
#[command(about = "One-time secret sharing: run the store, manage identities", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the database, apply migrations and run the expiry janitor until Ctrl-C.
    Run,
    /// Create or update an identity's limits (0 = unlimited).
    SetLimits {
        token: String,
        #[arg(long, default_value = "0")]
        retention_minutes: u32,
        #[arg(long, default_value = "0")]
        max_size_bytes: u32,
        #[arg(long, default_value = "0")]
        creation_limit_minutes: u32,
    },
    /// Print an identity's limits and last creation time.
    ShowLimits { token: String },
    /// Delete an identity.
    RemoveIdentity { token: String },
    /// Store a secret and print its one-time link.
    Share {
        /// Secret text.
        data: String,
        #[arg(short, long, default_value = "default")]
        user_token: String,
        /// Time-to-live in minutes; defaults to the identity's retention limit.
        #[arg(short, long)]
        retention: Option<u32>,
    },
    /// Fetch (and delete) a secret by token; prints the JSON response.
    Consume { token: String },
    /// Print the stored schema version.
    Version,
}
