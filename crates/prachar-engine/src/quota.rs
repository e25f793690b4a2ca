// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily usage limiter for free-plan sessions.
//!
//! Keeps an in-memory per-day success count keyed on the UTC calendar day
//! and enforces the configured quota. The counter is advisory: it can be
//! hydrated from the persistent store at startup and written through after
//! each success, but the in-memory value is what gates generation. Single
//! writer assumed; the orchestrator serializes access behind a mutex.

use chrono::Utc;
use prachar_core::{PracharError, StoreAdapter};

/// Today's counter key, `YYYY-MM-DD` in UTC.
pub fn today_key() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// In-memory daily generation counter with a fixed quota.
pub struct UsageLimiter {
    count: u32,
    quota: u32,
    day_key: String,
}

impl UsageLimiter {
    /// Create a limiter with a zero count for today.
    pub fn new(quota: u32) -> Self {
        Self {
            count: 0,
            quota,
            day_key: today_key(),
        }
    }

    /// Create a limiter hydrated from the persistent usage counter, so quota
    /// enforcement is continuous across restarts.
    pub async fn from_store(
        quota: u32,
        store: &dyn StoreAdapter,
        user_id: &str,
    ) -> Result<Self, PracharError> {
        let day_key = today_key();
        let count = store.usage_count(user_id, &day_key).await?;
        Ok(Self {
            count,
            quota,
            day_key,
        })
    }

    /// Whether another generation is allowed today.
    ///
    /// Idempotent: repeated calls without [`record_success`] always return
    /// the same answer (apart from the implicit reset at day rollover).
    ///
    /// [`record_success`]: UsageLimiter::record_success
    pub fn check_quota(&mut self) -> bool {
        self.maybe_reset();
        self.count < self.quota
    }

    /// Record one successful, billable generation. Never decrements.
    pub fn record_success(&mut self) {
        self.maybe_reset();
        self.count += 1;
    }

    /// Generations left today (for UI hints).
    pub fn remaining(&self) -> u32 {
        self.quota.saturating_sub(self.count)
    }

    /// Current count (for reporting).
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Reset the count if the day has rolled over.
    fn maybe_reset(&mut self) {
        let today = today_key();
        if today != self.day_key {
            self.count = 0;
            self.day_key = today;
        }
    }

    /// Force a specific day key to exercise rollover in tests.
    #[cfg(test)]
    fn with_day_key(mut self, day_key: &str) -> Self {
        self.day_key = day_key.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_allows_until_exhausted() {
        let mut limiter = UsageLimiter::new(5);
        for _ in 0..5 {
            assert!(limiter.check_quota());
            limiter.record_success();
        }
        assert!(!limiter.check_quota());
        assert_eq!(limiter.remaining(), 0);
    }

    #[test]
    fn check_quota_is_idempotent() {
        let mut limiter = UsageLimiter::new(5);
        limiter.record_success();
        limiter.record_success();
        let first = limiter.check_quota();
        for _ in 0..10 {
            assert_eq!(limiter.check_quota(), first);
        }
        assert_eq!(limiter.count(), 2);
    }

    #[test]
    fn day_rollover_resets_count() {
        let mut limiter = UsageLimiter::new(2).with_day_key("2000-01-01");
        limiter.count = 2;
        // stale day key: the next check resets to today with a zero count
        assert!(limiter.check_quota());
        assert_eq!(limiter.count(), 0);
    }

    #[test]
    fn remaining_never_underflows() {
        let mut limiter = UsageLimiter::new(1);
        limiter.record_success();
        limiter.record_success();
        assert_eq!(limiter.remaining(), 0);
    }

    #[test]
    fn today_key_is_a_date_string() {
        let key = today_key();
        assert_eq!(key.len(), 10);
        assert_eq!(key.as_bytes()[4], b'-');
        assert_eq!(key.as_bytes()[7], b'-');
    }
}
