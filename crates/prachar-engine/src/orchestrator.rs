// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The generation orchestrator: the single entry point every content-producing
//! action goes through.
//!
//! Per invocation the state machine is:
//!
//! - **Start** -> free plan with exhausted quota: **LimitReached** (terminal,
//!   synthesized locally, no capability call)
//! - **Start** -> otherwise build the request and go to **Calling**
//! - **Calling** -> capability failure, deadline expiry, or a retryable
//!   normalizer failure: **Retrying** while attempts remain, else **Failed**
//! - **Calling** -> normalized envelope (success or model-asserted error):
//!   **Succeeded**
//! - **Retrying** -> fixed backoff, then **Calling**
//!
//! Attempts are strictly sequential; speculative parallel retries would risk
//! double-charging the quota and racing inconsistent results to the caller.
//! Every path resolves to a [`ResponseEnvelope`]; callers never see an `Err`.

use std::sync::Arc;
use std::time::Duration;

use prachar_config::model::LimitsConfig;
use prachar_core::envelope::ErrorCode;
use prachar_core::{
    FeatureType, FormInput, PlanTier, ResponseEnvelope, StoreAdapter, TextCapability,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::normalize::normalize;
use crate::quota::{today_key, UsageLimiter};
use crate::request::build_request;

const API_ERROR_MESSAGE: &str =
    "Something went wrong generating your content. Please try again.";
const DEADLINE_MESSAGE: &str =
    "The generation service took too long to respond. Please try again.";
const UNKNOWN_MESSAGE: &str = "An unknown error occurred.";

/// Orchestrates quota gating, the retry loop, and response normalization
/// around the text-generation capability.
pub struct GenerationOrchestrator {
    capability: Arc<dyn TextCapability>,
    limiter: Mutex<UsageLimiter>,
    /// Advisory write-through target for the usage counter, plus its user key.
    usage_store: Option<(Arc<dyn StoreAdapter>, String)>,
    max_attempts: u32,
    retry_backoff: Duration,
    deadline: Duration,
    quota: u32,
}

impl GenerationOrchestrator {
    /// Create an orchestrator over a text capability with the given policy.
    pub fn new(capability: Arc<dyn TextCapability>, limits: &LimitsConfig) -> Self {
        Self {
            capability,
            limiter: Mutex::new(UsageLimiter::new(limits.free_daily_quota)),
            usage_store: None,
            max_attempts: limits.max_attempts,
            retry_backoff: Duration::from_secs(limits.retry_backoff_secs),
            deadline: Duration::from_secs(limits.deadline_secs),
            quota: limits.free_daily_quota,
        }
    }

    /// Attach a store for advisory usage-counter persistence.
    ///
    /// The in-memory limiter stays authoritative for gating; the store write
    /// is best-effort and its failure never affects a generation result.
    pub fn with_usage_store(
        mut self,
        store: Arc<dyn StoreAdapter>,
        user_id: impl Into<String>,
    ) -> Self {
        self.usage_store = Some((store, user_id.into()));
        self
    }

    /// Hydrate today's count from the attached store (call once at startup).
    pub async fn hydrate_usage(&self) -> Result<(), prachar_core::PracharError> {
        if let Some((store, user_id)) = &self.usage_store {
            let hydrated = UsageLimiter::from_store(self.quota, store.as_ref(), user_id).await?;
            *self.limiter.lock().await = hydrated;
        }
        Ok(())
    }

    /// Generations left today for a free-plan session.
    pub async fn remaining_quota(&self) -> u32 {
        self.limiter.lock().await.remaining()
    }

    /// Run one generation and return its envelope. Never returns `Err`.
    pub async fn generate(
        &self,
        feature: FeatureType,
        input: &FormInput,
        plan: PlanTier,
    ) -> ResponseEnvelope {
        // Start -> LimitReached: gate before any network traffic.
        if plan == PlanTier::Free && !self.limiter.lock().await.check_quota() {
            info!(%feature, "daily quota exhausted, synthesizing limit envelope");
            return ResponseEnvelope::failure(
                feature,
                plan,
                ErrorCode::LimitReached,
                format!(
                    "Your daily limit of {} generations is used up. Upgrade to create unlimited content.",
                    self.quota
                ),
            );
        }

        // Unreachable under validated config; mirrors the taxonomy's
        // defensive UNKNOWN_ERROR fallback.
        if self.max_attempts == 0 {
            return ResponseEnvelope::failure(feature, plan, ErrorCode::UnknownError, UNKNOWN_MESSAGE);
        }

        let request = build_request(feature, input, plan);
        let mut deadline_hit = false;

        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                warn!(attempt, "retrying generation after transient failure");
                tokio::time::sleep(self.retry_backoff).await;
            }

            let call = self.capability.generate_text(request.clone());
            match tokio::time::timeout(self.deadline, call).await {
                Err(_) => {
                    deadline_hit = true;
                    warn!(attempt, deadline = ?self.deadline, "capability call exceeded deadline");
                }
                Ok(Err(e)) => {
                    deadline_hit = false;
                    warn!(attempt, error = %e, "capability call failed");
                }
                Ok(Ok(response)) => match normalize(feature, plan, &response.text) {
                    Ok(envelope) => {
                        debug!(attempt, success = envelope.is_success(), "reply normalized");
                        if plan == PlanTier::Free && envelope.is_success() {
                            self.record_billable_success().await;
                        }
                        return envelope;
                    }
                    Err(e) => {
                        deadline_hit = false;
                        warn!(attempt, error = %e, "reply failed normalization");
                    }
                },
            }
        }

        // Failed (terminal): the deadline code only applies when the final
        // attempt was the one that timed out.
        let (code, message) = if deadline_hit {
            (ErrorCode::DeadlineExceeded, DEADLINE_MESSAGE)
        } else {
            (ErrorCode::ApiError, API_ERROR_MESSAGE)
        };
        ResponseEnvelope::failure(feature, plan, code, message)
    }

    /// Count a successful free-plan generation, with advisory persistence.
    async fn record_billable_success(&self) {
        self.limiter.lock().await.record_success();
        if let Some((store, user_id)) = &self.usage_store {
            let day = today_key();
            if let Err(e) = store.increment_usage(user_id, &day).await {
                warn!(error = %e, "usage counter write-through failed; continuing");
            }
        }
    }
}
