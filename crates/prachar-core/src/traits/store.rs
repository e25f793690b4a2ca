// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store adapter trait for the profile/history persistence collaborator.

use async_trait::async_trait;

use crate::error::PracharError;
use crate::traits::adapter::Adapter;
use crate::types::{HistoryItem, ProfilePatch, UserProfile};

/// Adapter for the profile/history persistence backend.
///
/// All operations may fail independently of the generation pipeline; callers
/// must treat store failures as non-fatal to an envelope already produced
/// (log and continue, never roll back).
#[async_trait]
pub trait StoreAdapter: Adapter {
    /// Initializes the backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), PracharError>;

    /// Fetches a profile, or `None` if the user has none yet.
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, PracharError>;

    /// Creates or partially updates a profile; `None` patch fields are untouched.
    async fn upsert_profile(&self, user_id: &str, patch: ProfilePatch)
        -> Result<(), PracharError>;

    /// Flips the user's plan to paid.
    async fn upgrade_plan(&self, user_id: &str) -> Result<(), PracharError>;

    /// Lists generation history, newest first.
    async fn list_history(&self, user_id: &str) -> Result<Vec<HistoryItem>, PracharError>;

    /// Appends an immutable history record and returns it as stored.
    async fn append_history(
        &self,
        user_id: &str,
        item: &HistoryItem,
    ) -> Result<HistoryItem, PracharError>;

    /// Deletes a history record by id.
    async fn delete_history(&self, id: &str) -> Result<(), PracharError>;

    /// Reads the advisory per-day success counter.
    async fn usage_count(&self, user_id: &str, day: &str) -> Result<u32, PracharError>;

    /// Increments the advisory per-day success counter, returning the new count.
    async fn increment_usage(&self, user_id: &str, day: &str) -> Result<u32, PracharError>;
}
