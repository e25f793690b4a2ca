// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory store adapter for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use prachar_core::traits::adapter::{AdapterKind, HealthStatus};
use prachar_core::types::{HistoryItem, Language, PlanTier, ProfilePatch, UserProfile};
use prachar_core::{Adapter, PracharError, StoreAdapter};

#[derive(Default)]
struct Inner {
    profiles: HashMap<String, UserProfile>,
    history: Vec<(String, HistoryItem)>,
    usage: HashMap<(String, String), u32>,
}

/// An in-memory [`StoreAdapter`] with the same semantics as the SQLite
/// backend: partial upserts, newest-first history, per-day usage counters.
#[derive(Clone, Default)]
pub struct MockStore {
    inner: Arc<Mutex<Inner>>,
    /// When true, every operation fails; exercises non-fatal store handling.
    fail: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails.
    pub fn failing() -> Self {
        Self {
            inner: Arc::default(),
            fail: true,
        }
    }

    fn gate(&self) -> Result<(), PracharError> {
        if self.fail {
            Err(PracharError::Store {
                source: "mock store configured to fail".into(),
            })
        } else {
            Ok(())
        }
    }

    fn blank_profile() -> UserProfile {
        UserProfile {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            business_name: String::new(),
            business_type: String::new(),
            city: String::new(),
            default_language: Language::Hinglish,
            plan: PlanTier::Free,
        }
    }
}

#[async_trait]
impl Adapter for MockStore {
    fn name(&self) -> &str {
        "mock-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, PracharError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PracharError> {
        Ok(())
    }
}

#[async_trait]
impl StoreAdapter for MockStore {
    async fn initialize(&self) -> Result<(), PracharError> {
        self.gate()
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, PracharError> {
        self.gate()?;
        Ok(self.inner.lock().await.profiles.get(user_id).cloned())
    }

    async fn upsert_profile(
        &self,
        user_id: &str,
        patch: ProfilePatch,
    ) -> Result<(), PracharError> {
        self.gate()?;
        let mut inner = self.inner.lock().await;
        let profile = inner
            .profiles
            .entry(user_id.to_string())
            .or_insert_with(Self::blank_profile);
        if let Some(name) = patch.name {
            profile.name = name;
        }
        if let Some(email) = patch.email {
            profile.email = email;
        }
        if let Some(phone) = patch.phone {
            profile.phone = phone;
        }
        if let Some(business_name) = patch.business_name {
            profile.business_name = business_name;
        }
        if let Some(business_type) = patch.business_type {
            profile.business_type = business_type;
        }
        if let Some(city) = patch.city {
            profile.city = city;
        }
        if let Some(default_language) = patch.default_language {
            profile.default_language = default_language;
        }
        if let Some(plan) = patch.plan {
            profile.plan = plan;
        }
        Ok(())
    }

    async fn upgrade_plan(&self, user_id: &str) -> Result<(), PracharError> {
        self.upsert_profile(
            user_id,
            ProfilePatch {
                plan: Some(PlanTier::Paid),
                ..Default::default()
            },
        )
        .await
    }

    async fn list_history(&self, user_id: &str) -> Result<Vec<HistoryItem>, PracharError> {
        self.gate()?;
        let inner = self.inner.lock().await;
        let mut items: Vec<HistoryItem> = inner
            .history
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, item)| item.clone())
            .collect();
        items.reverse(); // newest first
        Ok(items)
    }

    async fn append_history(
        &self,
        user_id: &str,
        item: &HistoryItem,
    ) -> Result<HistoryItem, PracharError> {
        self.gate()?;
        self.inner
            .lock()
            .await
            .history
            .push((user_id.to_string(), item.clone()));
        Ok(item.clone())
    }

    async fn delete_history(&self, id: &str) -> Result<(), PracharError> {
        self.gate()?;
        self.inner
            .lock()
            .await
            .history
            .retain(|(_, item)| item.id != id);
        Ok(())
    }

    async fn usage_count(&self, user_id: &str, day: &str) -> Result<u32, PracharError> {
        self.gate()?;
        Ok(*self
            .inner
            .lock()
            .await
            .usage
            .get(&(user_id.to_string(), day.to_string()))
            .unwrap_or(&0))
    }

    async fn increment_usage(&self, user_id: &str, day: &str) -> Result<u32, PracharError> {
        self.gate()?;
        let mut inner = self.inner.lock().await;
        let count = inner
            .usage
            .entry((user_id.to_string(), day.to_string()))
            .or_insert(0);
        *count += 1;
        Ok(*count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_is_partial() {
        let store = MockStore::new();
        store
            .upsert_profile(
                "u1",
                ProfilePatch {
                    name: Some("Amit".into()),
                    city: Some("Mumbai".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store
            .upsert_profile(
                "u1",
                ProfilePatch {
                    city: Some("Pune".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let profile = store.get_profile("u1").await.unwrap().unwrap();
        assert_eq!(profile.name, "Amit");
        assert_eq!(profile.city, "Pune");
    }

    #[tokio::test]
    async fn upgrade_flips_plan() {
        let store = MockStore::new();
        store.upgrade_plan("u1").await.unwrap();
        let profile = store.get_profile("u1").await.unwrap().unwrap();
        assert_eq!(profile.plan, PlanTier::Paid);
    }

    #[tokio::test]
    async fn usage_counter_increments_per_day() {
        let store = MockStore::new();
        assert_eq!(store.usage_count("u1", "2026-08-06").await.unwrap(), 0);
        assert_eq!(store.increment_usage("u1", "2026-08-06").await.unwrap(), 1);
        assert_eq!(store.increment_usage("u1", "2026-08-06").await.unwrap(), 2);
        assert_eq!(store.usage_count("u1", "2026-08-07").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failing_store_fails_every_operation() {
        let store = MockStore::failing();
        assert!(store.get_profile("u1").await.is_err());
        assert!(store.usage_count("u1", "2026-08-06").await.is_err());
    }
}
