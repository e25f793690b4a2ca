// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StoreAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use prachar_config::model::StorageConfig;
use prachar_core::traits::adapter::{AdapterKind, HealthStatus};
use prachar_core::types::{HistoryItem, ProfilePatch, UserProfile};
use prachar_core::{Adapter, PracharError, StoreAdapter};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily opened on the first call to
/// [`StoreAdapter::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, PracharError> {
        self.db.get().ok_or_else(|| PracharError::Store {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl Adapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, PracharError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok::<_, rusqlite::Error>(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PracharError> {
        // Checkpoint the WAL if the DB was ever opened; the background
        // connection thread exits when the handle drops.
        if let Some(db) = self.db.get() {
            db.connection()
                .call(|conn| -> Result<(), rusqlite::Error> {
                    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                    Ok(())
                })
                .await
                .map_err(crate::database::map_tr_err)?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StoreAdapter for SqliteStore {
    async fn initialize(&self) -> Result<(), PracharError> {
        self.db
            .get_or_try_init(|| Database::open(&self.config))
            .await?;
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, PracharError> {
        queries::profiles::get_profile(self.db()?, user_id).await
    }

    async fn upsert_profile(
        &self,
        user_id: &str,
        patch: ProfilePatch,
    ) -> Result<(), PracharError> {
        queries::profiles::upsert_profile(self.db()?, user_id, patch).await
    }

    async fn upgrade_plan(&self, user_id: &str) -> Result<(), PracharError> {
        queries::profiles::upgrade_plan(self.db()?, user_id).await
    }

    async fn list_history(&self, user_id: &str) -> Result<Vec<HistoryItem>, PracharError> {
        queries::history::list_history(self.db()?, user_id).await
    }

    async fn append_history(
        &self,
        user_id: &str,
        item: &HistoryItem,
    ) -> Result<HistoryItem, PracharError> {
        queries::history::append_history(self.db()?, user_id, item).await
    }

    async fn delete_history(&self, id: &str) -> Result<(), PracharError> {
        queries::history::delete_history(self.db()?, id).await
    }

    async fn usage_count(&self, user_id: &str, day: &str) -> Result<u32, PracharError> {
        queries::usage::usage_count(self.db()?, user_id, day).await
    }

    async fn increment_usage(&self, user_id: &str, day: &str) -> Result<u32, PracharError> {
        queries::usage::increment_usage(self.db()?, user_id, day).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prachar_core::types::PlanTier;

    fn store_in(dir: &tempfile::TempDir) -> SqliteStore {
        SqliteStore::new(StorageConfig {
            database_path: dir.path().join("prachar.db").to_string_lossy().into_owned(),
            wal_mode: true,
        })
    }

    #[tokio::test]
    async fn operations_fail_before_initialize() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.get_profile("u1").await.is_err());
    }

    #[tokio::test]
    async fn initialize_then_full_profile_flow() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.initialize().await.unwrap();

        store
            .upsert_profile(
                "u1",
                ProfilePatch {
                    business_name: Some("Glow Salon".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store.upgrade_plan("u1").await.unwrap();

        let profile = store.get_profile("u1").await.unwrap().unwrap();
        assert_eq!(profile.business_name, "Glow Salon");
        assert_eq!(profile.plan, PlanTier::Paid);
    }

    #[tokio::test]
    async fn health_check_reports_healthy_once_open() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.initialize().await.unwrap();
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn usage_counters_via_adapter() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.initialize().await.unwrap();
        assert_eq!(store.increment_usage("u1", "2026-08-06").await.unwrap(), 1);
        assert_eq!(store.usage_count("u1", "2026-08-06").await.unwrap(), 1);
    }
}
