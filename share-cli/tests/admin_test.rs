//! Integration tests for the administration commands against an on-disk database.

use share_cli::{open_store, run_admin, Commands};
use share_core::AppConfig;
use share_storage::{IdentityLimits, LATEST_VERSION};

fn config_for(dir: &tempfile::TempDir) -> AppConfig {
    AppConfig {
        database_path: dir.path().join("share.db").to_str().unwrap().to_string(),
        log_file: dir.path().join("share.log").to_str().unwrap().to_string(),
        public_host: "localhost".to_string(),
        default_retention_limit_minutes: 60,
        default_max_message_size_bytes: 1024,
        default_message_creation_limit_minutes: 0,
        expiry_sweep_interval_secs: 60,
    }
}

/// **Test: set-limits, then remove-identity.**
///
/// **Expected:** The identity exists with the given limits, then is gone.
#[tokio::test]
async fn test_set_and_remove_identity() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);

    run_admin(
        config.clone(),
        Commands::SetLimits {
            token: "alice".to_string(),
            retention_minutes: 30,
            max_size_bytes: 512,
            creation_limit_minutes: 2,
        },
    )
    .await
    .unwrap();

    let store = open_store(&config).await.unwrap();
    assert_eq!(
        store.get_limits("alice").await.unwrap(),
        Some(IdentityLimits::new(30, 512, 2))
    );
    assert_eq!(store.version().await.unwrap(), LATEST_VERSION);
    store.disconnect().await;

    run_admin(
        config.clone(),
        Commands::RemoveIdentity {
            token: "alice".to_string(),
        },
    )
    .await
    .unwrap();

    let store = open_store(&config).await.unwrap();
    assert!(!store.identity_exists("alice").await.unwrap());
    store.disconnect().await;
}

/// **Test: share for an unknown identity fails.**
#[tokio::test]
async fn test_share_unknown_identity_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);

    let result = run_admin(
        config,
        Commands::Share {
            data: "secret".to_string(),
            user_token: "nobody".to_string(),
            retention: None,
        },
    )
    .await;
    assert!(result.is_err());
}

/// **Test: share then consume through the admin commands.**
///
/// **Expected:** Both succeed and the message is gone afterwards.
#[tokio::test]
async fn test_share_then_consume() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);

    run_admin(
        config.clone(),
        Commands::SetLimits {
            token: "bob".to_string(),
            retention_minutes: 0,
            max_size_bytes: 0,
            creation_limit_minutes: 0,
        },
    )
    .await
    .unwrap();

    run_admin(
        config.clone(),
        Commands::Share {
            data: "secret".to_string(),
            user_token: "bob".to_string(),
            retention: Some(5),
        },
    )
    .await
    .unwrap();

    let store = open_store(&config).await.unwrap();
    assert!(store.last_creation_timestamp("bob").await.unwrap() > 0);
    store.disconnect().await;

    run_admin(
        config,
        Commands::Consume {
            token: "not-a-real-token".to_string(),
        },
    )
    .await
    .unwrap();
}

/// **Test: invalid config is rejected before touching the database.**
#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(&dir);
    config.expiry_sweep_interval_secs = 0;

    assert!(run_admin(config, Commands::Version).await.is_err());
}
