// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The request builder: `(feature, form input, plan)` to a capability request.
//!
//! Pure and infallible. Every optional refinement gets a stable default so
//! the downstream schema contract is always satisfiable regardless of which
//! fields the caller omitted. The user's logo never travels to the model; it
//! exists only for client-side compositing.

use prachar_core::types::{ClipDuration, FormInput, TextRequest, VoiceGender};
use prachar_core::{FeatureType, PlanTier};

use crate::instruction::SYSTEM_INSTRUCTION;

const DEFAULT_OBJECTIVE: &str = "Awareness";
const DEFAULT_HOOK_STYLE: &str = "Emotional";
const DEFAULT_TARGET_AUDIENCE: &str = "General Public";
const DEFAULT_VISUAL_STYLE: &str = "Cinematic Live Action";

/// Build the capability request for one generation.
///
/// Deterministic given its inputs; building a request cannot fail.
pub fn build_request(feature: FeatureType, input: &FormInput, plan: PlanTier) -> TextRequest {
    let inputs = serde_json::json!({
        "business_type": input.business_type,
        "business_name": input.business_name,
        "city": input.city,
        "language": input.language,
        "tone": input.tone,
        "offer_details": input.offer_details,
        "festival_name": input.festival_name.as_deref().unwrap_or(""),
        "duration": input.duration.unwrap_or(ClipDuration::Short),
        "objective": input.objective.as_deref().unwrap_or(DEFAULT_OBJECTIVE),
        "hook_style": input.hook_style.as_deref().unwrap_or(DEFAULT_HOOK_STYLE),
        "target_audience": input
            .target_audience
            .as_deref()
            .unwrap_or(DEFAULT_TARGET_AUDIENCE),
        "voice_gender": input.voice_gender.unwrap_or(VoiceGender::Female),
        "visual_style": input.visual_style.as_deref().unwrap_or(DEFAULT_VISUAL_STYLE),
        "count": variant_count(feature, plan),
    });

    let body = serde_json::json!({
        "user_plan": plan,
        "feature": feature,
        "inputs": inputs,
    });

    TextRequest {
        system: SYSTEM_INSTRUCTION.to_string(),
        body: body.to_string(),
    }
}

/// Variant cardinality per plan: free output is always a single variant;
/// paid plans get multiple options where the feature supports them.
fn variant_count(feature: FeatureType, plan: PlanTier) -> u32 {
    match plan {
        PlanTier::Free => 1,
        PlanTier::Paid => match feature {
            FeatureType::Instagram => 3,
            FeatureType::Whatsapp => 5,
            _ => 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prachar_core::types::{Language, Tone};
    use serde_json::Value;

    const ALL_FEATURES: [FeatureType; 7] = [
        FeatureType::Instagram,
        FeatureType::Whatsapp,
        FeatureType::Reels,
        FeatureType::Festival,
        FeatureType::Calendar,
        FeatureType::Gmb,
        FeatureType::Poster,
    ];

    fn minimal_input() -> FormInput {
        FormInput {
            business_type: "Salon".into(),
            business_name: "Glow Salon".into(),
            city: "Mumbai".into(),
            language: Language::Hinglish,
            tone: Tone::Friendly,
            offer_details: "50% off bridal makeup".into(),
            festival_name: None,
            duration: None,
            objective: None,
            hook_style: None,
            target_audience: None,
            voice_gender: None,
            visual_style: None,
            logo: None,
        }
    }

    fn body_json(request: &TextRequest) -> Value {
        serde_json::from_str(&request.body).expect("body is valid JSON")
    }

    #[test]
    fn every_optional_field_gets_a_default() {
        for feature in ALL_FEATURES {
            for plan in [PlanTier::Free, PlanTier::Paid] {
                let request = build_request(feature, &minimal_input(), plan);
                let inputs = &body_json(&request)["inputs"];
                for key in [
                    "business_type",
                    "business_name",
                    "city",
                    "language",
                    "tone",
                    "offer_details",
                    "festival_name",
                    "duration",
                    "objective",
                    "hook_style",
                    "target_audience",
                    "voice_gender",
                    "visual_style",
                    "count",
                ] {
                    assert!(
                        !inputs[key].is_null(),
                        "{feature}/{plan}: inputs.{key} must not be null"
                    );
                }
            }
        }
    }

    #[test]
    fn glow_salon_free_caption_scenario() {
        let request = build_request(FeatureType::Instagram, &minimal_input(), PlanTier::Free);
        let body = body_json(&request);
        assert_eq!(body["user_plan"], "free");
        assert_eq!(body["feature"], "instagram");
        assert_eq!(body["inputs"]["business_name"], "Glow Salon");
        assert_eq!(body["inputs"]["offer_details"], "50% off bridal makeup");
        assert_eq!(body["inputs"]["count"], 1);
    }

    #[test]
    fn stable_defaults_for_omitted_refinements() {
        let request = build_request(FeatureType::Reels, &minimal_input(), PlanTier::Paid);
        let inputs = body_json(&request)["inputs"].clone();
        assert_eq!(inputs["duration"], "15s");
        assert_eq!(inputs["objective"], "Awareness");
        assert_eq!(inputs["hook_style"], "Emotional");
        assert_eq!(inputs["target_audience"], "General Public");
        assert_eq!(inputs["voice_gender"], "Female");
        assert_eq!(inputs["visual_style"], "Cinematic Live Action");
        assert_eq!(inputs["festival_name"], "");
    }

    #[test]
    fn caller_values_override_defaults() {
        let mut input = minimal_input();
        input.duration = Some(ClipDuration::Long);
        input.objective = Some("Sales/Offer".into());
        input.voice_gender = Some(VoiceGender::Male);
        let request = build_request(FeatureType::Reels, &input, PlanTier::Paid);
        let inputs = body_json(&request)["inputs"].clone();
        assert_eq!(inputs["duration"], "45s");
        assert_eq!(inputs["objective"], "Sales/Offer");
        assert_eq!(inputs["voice_gender"], "Male");
    }

    #[test]
    fn paid_variant_counts() {
        let input = minimal_input();
        let count = |feature, plan| {
            body_json(&build_request(feature, &input, plan))["inputs"]["count"]
                .as_u64()
                .unwrap()
        };
        assert_eq!(count(FeatureType::Instagram, PlanTier::Paid), 3);
        assert_eq!(count(FeatureType::Whatsapp, PlanTier::Paid), 5);
        assert_eq!(count(FeatureType::Poster, PlanTier::Paid), 1);
        assert_eq!(count(FeatureType::Instagram, PlanTier::Free), 1);
        assert_eq!(count(FeatureType::Whatsapp, PlanTier::Free), 1);
    }

    #[test]
    fn logo_never_reaches_the_request() {
        let mut input = minimal_input();
        input.logo = Some("data:image/png;base64,AAAA".into());
        let request = build_request(FeatureType::Instagram, &input, PlanTier::Free);
        assert!(!request.body.contains("AAAA"));
        assert!(body_json(&request)["inputs"].get("logo").is_none());
    }

    #[test]
    fn builder_is_deterministic() {
        let input = minimal_input();
        let a = build_request(FeatureType::Festival, &input, PlanTier::Paid);
        let b = build_request(FeatureType::Festival, &input, PlanTier::Paid);
        assert_eq!(a, b);
    }

    #[test]
    fn system_instruction_rides_along() {
        let request = build_request(FeatureType::Poster, &minimal_input(), PlanTier::Free);
        assert_eq!(request.system, SYSTEM_INSTRUCTION);
    }
}
