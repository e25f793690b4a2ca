// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The response normalizer: raw model text to a structurally valid envelope.
//!
//! Models wrap JSON in prose and markdown fences no matter how firmly the
//! instruction forbids it, so the normalizer extracts the first `{`..last `}`
//! span before parsing. A reply that parses but asserts neither success nor
//! an explicit error, or whose success data cannot be coerced into the
//! feature's canonical shape, is a retryable failure. Error-flagged replies
//! are terminal and pass through unchanged; the model already made up its
//! mind and retrying would burn an attempt for nothing.

use prachar_core::envelope::EnvelopeError;
use prachar_core::{FeatureType, PlanTier, ResponseEnvelope, WireEnvelope};
use thiserror::Error;

/// A retryable normalization failure. Terminal outcomes (success envelopes
/// and model-asserted errors) come back as `Ok`.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("reply is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

/// Extract the JSON object span from a raw model reply.
///
/// Takes the substring between the first `{` and the last `}`, which also
/// strips any markdown fence around the object. When no brace pair exists,
/// falls back to peeling fence markers so the JSON parser can produce a
/// useful error about what remains.
pub fn extract_json(raw: &str) -> &str {
    let text = raw.trim();

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return &text[start..=end];
        }
    }

    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

/// Normalize a raw capability reply into a valid [`ResponseEnvelope`].
///
/// Missing feature/plan echoes are filled from the request context.
pub fn normalize(
    feature: FeatureType,
    plan: PlanTier,
    raw: &str,
) -> Result<ResponseEnvelope, NormalizeError> {
    let span = extract_json(raw);
    let wire: WireEnvelope = serde_json::from_str(span)?;
    Ok(ResponseEnvelope::from_wire(wire, Some(feature), Some(plan))?)
}
