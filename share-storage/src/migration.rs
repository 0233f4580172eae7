//! # Schema migrations
//!
//! The stored schema version is brought up to [`LATEST_VERSION`] at startup by
//! running an ordered chain of [`Updater`]s. Each updater upgrades the database
//! *to* its `version`.
//!
//! ## Example
//!
//! ```rust,ignore
//! let store = ShareStore::connect("./one_time_share.db").await?;
//! share_storage::migrate(&store).await?;
//! ```

use std::future::Future;
use std::pin::Pin;

use crate::error::StorageError;
use crate::store::ShareStore;
use tracing::info;

/// Oldest schema version that can still be upgraded.
pub const MINIMAL_VERSION: &str = "0.1";
/// Schema version written by this build.
pub const LATEST_VERSION: &str = "0.1";

pub type UpdateFuture<'a> = Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>>;

/// One step of the migration chain.
#[derive(Clone, Copy)]
pub struct Updater {
    /// Version the database is at after `apply` succeeds.
    pub version: &'static str,
    pub apply: for<'a> fn(&'a ShareStore) -> UpdateFuture<'a>,
}

/// Every updater this build knows, oldest first.
fn all_updaters() -> Vec<Updater> {
    Vec::new()
}

/// Upgrades the store to [`LATEST_VERSION`] and records it.
pub async fn migrate(store: &ShareStore) -> Result<(), StorageError> {
    migrate_with(store, &all_updaters(), LATEST_VERSION).await
}

/// Runs the updaters needed to go from the stored version to `latest`, then stores `latest`.
pub async fn migrate_with(
    store: &ShareStore,
    updaters: &[Updater],
    latest: &str,
) -> Result<(), StorageError> {
    let current = store.version().await?;
    if current != latest {
        let plan = plan_updates(&current, latest, updaters)?;
        info!(from = %current, to = %latest, steps = plan.len(), "Migrating database");
        for updater in plan {
            (updater.apply)(store).await?;
            info!(version = updater.version, "Applied database update");
        }
    }
    store.set_version(latest).await
}

/// Selects the updaters that follow `from`, up to and including the one producing `to`.
///
/// Starting at [`MINIMAL_VERSION`] takes the chain from its first step.
pub fn plan_updates(from: &str, to: &str, all: &[Updater]) -> Result<Vec<Updater>, StorageError> {
    let mut plan = Vec::new();
    let mut started = from == MINIMAL_VERSION;

    for updater in all {
        if started {
            plan.push(*updater);
            if updater.version == to {
                break;
            }
        } else if updater.version == from {
            started = true;
        }
    }

    match plan.last() {
        Some(last) if last.version != to => Err(StorageError::Migration(format!(
            "last updater found is {}, expected {}",
            last.version, to
        ))),
        None if from != to => Err(StorageError::Migration(format!(
            "no update path from version {} to {}",
            from, to
        ))),
        _ => Ok(plan),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_store: &ShareStore) -> UpdateFuture<'_> {
        Box::pin(async { Ok(()) })
    }

    fn chain() -> Vec<Updater> {
        vec![
            Updater { version: "0.2", apply: noop },
            Updater { version: "0.3", apply: noop },
            Updater { version: "0.4", apply: noop },
        ]
    }

    fn versions(plan: &[Updater]) -> Vec<&'static str> {
        plan.iter().map(|u| u.version).collect()
    }

    #[test]
    fn test_plan_from_minimal_starts_at_first_updater() {
        let plan = plan_updates(MINIMAL_VERSION, "0.3", &chain()).unwrap();
        assert_eq!(versions(&plan), vec!["0.2", "0.3"]);
    }

    #[test]
    fn test_plan_from_intermediate_version() {
        let plan = plan_updates("0.2", "0.4", &chain()).unwrap();
        assert_eq!(versions(&plan), vec!["0.3", "0.4"]);
    }

    #[test]
    fn test_plan_same_version_is_empty() {
        assert!(plan_updates(LATEST_VERSION, LATEST_VERSION, &all_updaters()).unwrap().is_empty());
    }

    #[test]
    fn test_plan_unknown_version_fails() {
        assert!(matches!(
            plan_updates("0.0", "0.3", &chain()),
            Err(StorageError::Migration(_))
        ));
    }

    #[test]
    fn test_plan_missing_target_fails() {
        assert!(matches!(
            plan_updates(MINIMAL_VERSION, "0.9", &chain()),
            Err(StorageError::Migration(_))
        ));
    }
}
