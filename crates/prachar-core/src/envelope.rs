// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The uniform response envelope returned by the generation pipeline.
//!
//! Every caller-facing path resolves to a [`ResponseEnvelope`]: either a
//! successful, canonically-shaped data payload, or an error code from the
//! closed taxonomy. [`WireEnvelope`] is the lenient wire-side mirror used to
//! parse whatever the model actually produced before the envelope invariants
//! are enforced.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::payload::{coerce, CoerceError, FeaturePayload};
use crate::types::{FeatureType, PlanTier};

/// The closed set of error codes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Free-plan daily quota exhausted; synthesized locally, no network call.
    LimitReached,
    /// The capability failed or returned unusable output after retries.
    ApiError,
    /// The model itself rejected the inputs; echoed through unchanged.
    InvalidInput,
    /// The capability call exceeded its deadline on the final attempt.
    DeadlineExceeded,
    /// Defensive fallback; unreachable if the orchestrator is correct.
    UnknownError,
}

/// The uniform contract returned to all callers, regardless of feature.
///
/// Invariant: exactly one of `data` (with `success == true`) or
/// `code`/`message` (with `error == true`) is populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    #[serde(rename = "type")]
    pub feature: FeatureType,
    #[serde(rename = "user_plan")]
    pub plan: PlanTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<FeaturePayload>,
    /// Present only on free-plan successful responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_note: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResponseEnvelope {
    /// Build a successful envelope around a canonical payload.
    pub fn success(
        feature: FeatureType,
        plan: PlanTier,
        data: FeaturePayload,
        upgrade_note: Option<String>,
    ) -> Self {
        Self {
            success: true,
            feature,
            plan,
            data: Some(data),
            upgrade_note,
            error: false,
            code: None,
            message: None,
        }
    }

    /// Build an error envelope with a code from the closed taxonomy.
    pub fn failure(
        feature: FeatureType,
        plan: PlanTier,
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            feature,
            plan,
            data: None,
            upgrade_note: None,
            error: true,
            code: Some(code),
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success && !self.error
    }
}

/// Reasons a wire envelope cannot become a valid [`ResponseEnvelope`].
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Neither the envelope nor the caller supplied feature/plan identity.
    #[error("envelope does not identify its feature or plan")]
    MissingEcho,

    /// The reply asserted neither success nor an explicit error.
    #[error("envelope asserted neither success nor error")]
    Indeterminate {
        /// The model's own message field, if it offered one.
        message: Option<String>,
    },

    /// A success-flagged reply whose data does not fit the feature's shape.
    #[error("envelope data rejected: {0}")]
    Payload(#[from] CoerceError),
}

/// Lenient wire-side mirror of [`ResponseEnvelope`].
///
/// Every field is optional or defaulted, and enum-valued fields degrade to
/// `None` on unrecognized strings instead of failing the whole parse. The
/// strict invariants are applied by [`ResponseEnvelope::from_wire`].
#[derive(Debug, Clone, Deserialize)]
pub struct WireEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub feature: Option<FeatureType>,
    #[serde(rename = "user_plan", default, deserialize_with = "lenient")]
    pub plan: Option<PlanTier>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub upgrade_note: Option<String>,
    #[serde(default)]
    pub error: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub code: Option<ErrorCode>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ResponseEnvelope {
    /// Enforce envelope invariants on a parsed wire reply.
    ///
    /// `fallback_feature` / `fallback_plan` fill missing echoes from the
    /// request context; persisted envelopes always carry their own.
    pub fn from_wire(
        wire: WireEnvelope,
        fallback_feature: Option<FeatureType>,
        fallback_plan: Option<PlanTier>,
    ) -> Result<Self, EnvelopeError> {
        let feature = wire
            .feature
            .or(fallback_feature)
            .ok_or(EnvelopeError::MissingEcho)?;
        let plan = wire.plan.or(fallback_plan).ok_or(EnvelopeError::MissingEcho)?;

        // An explicit error outcome wins over any success flag; unknown code
        // strings already degraded to None and fall back to the defensive code.
        if wire.error || wire.code.is_some() {
            return Ok(Self {
                success: false,
                feature,
                plan,
                data: None,
                upgrade_note: None,
                error: true,
                code: Some(wire.code.unwrap_or(ErrorCode::UnknownError)),
                message: wire.message,
            });
        }

        if !wire.success {
            return Err(EnvelopeError::Indeterminate {
                message: wire.message,
            });
        }

        let data = wire.data.unwrap_or(Value::Null);
        let payload = coerce(feature, &data)?;
        Ok(Self::success(feature, plan, payload, wire.upgrade_note))
    }
}

impl<'de> Deserialize<'de> for ResponseEnvelope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireEnvelope::deserialize(deserializer)?;
        ResponseEnvelope::from_wire(wire, None, None).map_err(serde::de::Error::custom)
    }
}

/// Deserialize a value, degrading unrecognized shapes to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_code_wire_names() {
        assert_eq!(
            serde_json::to_value(ErrorCode::LimitReached).unwrap(),
            "LIMIT_REACHED"
        );
        assert_eq!(serde_json::to_value(ErrorCode::ApiError).unwrap(), "API_ERROR");
        assert_eq!(
            serde_json::to_value(ErrorCode::DeadlineExceeded).unwrap(),
            "DEADLINE_EXCEEDED"
        );
        let code: ErrorCode = serde_json::from_str("\"INVALID_INPUT\"").unwrap();
        assert_eq!(code, ErrorCode::InvalidInput);
    }

    #[test]
    fn deserialize_successful_caption_envelope() {
        let raw = json!({
            "success": true,
            "type": "instagram",
            "user_plan": "free",
            "data": {"posts": [{"caption": "Look fab", "hashtags": ["#salon"]}]},
            "upgrade_note": "Upgrade for 3 options and hooks."
        });
        let envelope: ResponseEnvelope = serde_json::from_value(raw).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.feature, FeatureType::Instagram);
        assert_eq!(envelope.plan, PlanTier::Free);
        assert!(envelope.upgrade_note.is_some());
        match envelope.data.as_ref().unwrap() {
            FeaturePayload::Instagram(p) => assert_eq!(p.posts.len(), 1),
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn deserialize_error_envelope() {
        let raw = json!({
            "error": true,
            "type": "poster",
            "user_plan": "paid",
            "code": "INVALID_INPUT",
            "message": "Required fields are missing."
        });
        let envelope: ResponseEnvelope = serde_json::from_value(raw).unwrap();
        assert!(!envelope.is_success());
        assert!(envelope.error);
        assert_eq!(envelope.code, Some(ErrorCode::InvalidInput));
        assert!(envelope.data.is_none());
    }

    #[test]
    fn unknown_code_degrades_to_defensive_fallback() {
        let wire: WireEnvelope = serde_json::from_value(json!({
            "error": true,
            "code": "SOMETHING_NEW",
            "message": "odd"
        }))
        .unwrap();
        let envelope = ResponseEnvelope::from_wire(
            wire,
            Some(FeatureType::Poster),
            Some(PlanTier::Free),
        )
        .unwrap();
        assert_eq!(envelope.code, Some(ErrorCode::UnknownError));
    }

    #[test]
    fn missing_echo_filled_from_request_context() {
        let wire: WireEnvelope = serde_json::from_value(json!({
            "success": true,
            "data": {"poster_headline": "Sale"}
        }))
        .unwrap();
        let envelope = ResponseEnvelope::from_wire(
            wire,
            Some(FeatureType::Poster),
            Some(PlanTier::Paid),
        )
        .unwrap();
        assert_eq!(envelope.feature, FeatureType::Poster);
        assert_eq!(envelope.plan, PlanTier::Paid);
    }

    #[test]
    fn indeterminate_reply_carries_model_message() {
        let wire: WireEnvelope = serde_json::from_value(json!({
            "message": "I could not comply"
        }))
        .unwrap();
        let err = ResponseEnvelope::from_wire(
            wire,
            Some(FeatureType::Instagram),
            Some(PlanTier::Free),
        )
        .unwrap_err();
        match err {
            EnvelopeError::Indeterminate { message } => {
                assert_eq!(message.as_deref(), Some("I could not comply"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn success_with_uncoercible_data_is_rejected() {
        let wire: WireEnvelope = serde_json::from_value(json!({
            "success": true,
            "type": "instagram",
            "user_plan": "free",
            "data": {"unrelated": 1}
        }))
        .unwrap();
        let err = ResponseEnvelope::from_wire(wire, None, None).unwrap_err();
        assert!(matches!(err, EnvelopeError::Payload(_)));
    }

    #[test]
    fn envelope_round_trips_through_json() {
        let envelope = ResponseEnvelope::failure(
            FeatureType::Whatsapp,
            PlanTier::Free,
            ErrorCode::ApiError,
            "Something went wrong generating your content. Please try again.",
        );
        let json = serde_json::to_value(&envelope).unwrap();
        let back: ResponseEnvelope = serde_json::from_value(json).unwrap();
        assert_eq!(back, envelope);
    }
}
