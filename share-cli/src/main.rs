//! one-time-share CLI: run the store with its expiry janitor, or administer identities
//! and messages. Config from env (and `.env`).

use anyhow::Result;
use clap::Parser;
use share_cli::{run_admin, run_server, Cli, Commands};
use share_core::{init_console_tracing, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Run => run_server(config).await,
        command => {
            init_console_tracing()?;
            run_admin(config, command).await
        }
    }
}
