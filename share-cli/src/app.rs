//! Command implementations.

use std::time::Duration;

use anyhow::{Context, Result};
use share_core::{init_tracing, AppConfig};
use share_service::{unix_now, CreateMessageRequest, ShareService};
use share_storage::{migrate, ExpiryJanitor, IdentityLimits, ShareStore};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::cli::Commands;

/// Connects to the configured database and brings its schema up to date.
pub async fn open_store(config: &AppConfig) -> Result<ShareStore> {
    let store = ShareStore::connect(&config.database_path)
        .await
        .with_context(|| format!("Can't connect to database at {}", config.database_path))?;
    migrate(&store).await.context("Database migration failed")?;
    Ok(store)
}

/// Main entry for `run`: init logging, open the store, seed the default identity and run
/// the expiry janitor until Ctrl-C or a fatal storage error.
#[instrument(skip(config))]
pub async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        database_path = %config.database_path,
        public_host = %config.public_host,
        "Starting one-time-share"
    );

    let store = open_store(&config).await?;
    let service = ShareService::from_config(store.clone(), &config);
    service.seed_default_identity().await?;

    let cancel = CancellationToken::new();
    let interval = Duration::from_secs(config.expiry_sweep_interval_secs);
    let mut janitor = ExpiryJanitor::new(store.clone(), interval).spawn(cancel.clone());

    info!("Store ready");

    let finished = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            None
        }
        finished = &mut janitor => Some(finished.context("Expiry janitor panicked")?),
    };

    let outcome = match finished {
        Some(outcome) => outcome,
        None => {
            info!("Shutdown requested");
            cancel.cancel();
            janitor.await.context("Expiry janitor panicked")?
        }
    };

    store.disconnect().await;

    if let Err(e) = outcome {
        error!(error = %e, "Expiry janitor failed");
        return Err(e.into());
    }

    info!("Stopped");
    Ok(())
}

/// Runs one administration command against the configured database.
pub async fn run_admin(config: AppConfig, command: Commands) -> Result<()> {
    config.validate()?;
    let store = open_store(&config).await?;
    let result = execute(&store, &config, command).await;
    store.disconnect().await;
    result
}

async fn execute(store: &ShareStore, config: &AppConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Run => anyhow::bail!("run is not an administration command"),
        Commands::SetLimits {
            token,
            retention_minutes,
            max_size_bytes,
            creation_limit_minutes,
        } => {
            let limits = IdentityLimits::new(retention_minutes, max_size_bytes, creation_limit_minutes);
            store.set_limits(&token, limits).await?;
            println!("Limits set for {}", token);
        }
        Commands::ShowLimits { token } => match store.get_limits(&token).await? {
            Some(limits) => {
                let last_creation = store.last_creation_timestamp(&token).await?;
                println!("identity:               {}", token);
                println!("retention_limit_minutes: {}", limits.retention_limit_minutes);
                println!("max_size_bytes:          {}", limits.max_size_bytes);
                println!("creation_limit_minutes:  {}", limits.creation_limit_minutes);
                println!("last_creation_timestamp: {}", last_creation);
            }
            None => println!("Identity {} not found", token),
        },
        Commands::RemoveIdentity { token } => {
            store.remove_identity(&token).await?;
            println!("Identity {} removed", token);
        }
        Commands::Share {
            data,
            user_token,
            retention,
        } => {
            let service = ShareService::from_config(store.clone(), config);
            let request = CreateMessageRequest {
                user_token,
                message_data: data,
                retention,
            };
            let created = service.create_message(&request, unix_now()).await?;
            println!("{}", created.share_url);
        }
        Commands::Consume { token } => {
            let service = ShareService::from_config(store.clone(), config);
            let response = service.consume_message(&token, unix_now()).await?;
            println!("{}", response.to_json());
        }
        Commands::Version => {
            println!("{}", store.version().await?);
        }
    }
    Ok(())
}
