// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types shared across the Prachar workspace.
//!
//! The wire names on these enums are load-bearing: they appear verbatim in
//! the generation request body and in the envelope the model echoes back,
//! so serde renames here define the external contract.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Subscription tier governing quota and output richness.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Paid,
}

/// The closed set of content kinds the engine can generate.
///
/// `Calendar` and `Gmb` are paid-only features and generate from the business
/// profile alone (no offer/topic field).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FeatureType {
    /// Caption post: captions, hashtags, hooks.
    #[serde(alias = "instagram_caption")]
    Instagram,
    /// Bulk marketing messages.
    #[serde(alias = "whatsapp_message")]
    Whatsapp,
    /// Scripted short video with shot breakdown.
    #[serde(alias = "reels_script")]
    Reels,
    /// Festival pack: caption, wishes, poster copy.
    Festival,
    /// 30-day content calendar.
    Calendar,
    /// Business-listing pack: description, FAQs, review replies.
    Gmb,
    /// Poster copy: headline, subheadline, CTA.
    #[serde(alias = "poster_copy")]
    Poster,
}

impl FeatureType {
    /// Whether this feature is available to free-plan sessions.
    pub fn is_premium(self) -> bool {
        matches!(self, FeatureType::Calendar | FeatureType::Gmb)
    }

    /// Whether the form requires a non-empty offer/topic field.
    ///
    /// The two profile-driven features build their content from the business
    /// profile alone.
    pub fn requires_topic(self) -> bool {
        !matches!(self, FeatureType::Calendar | FeatureType::Gmb)
    }
}

/// Output language for generated content.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
pub enum Language {
    Hindi,
    English,
    #[default]
    Hinglish,
}

/// Voice/tone of the generated copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Friendly,
    Professional,
    Fun,
    Energetic,
    Inspirational,
    Urgent,
    Luxury,
    Casual,
    Witty,
    Empathetic,
    Bold,
    Dramatic,
}

/// Target clip length for scripted video features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum ClipDuration {
    /// The shortest supported clip; the default when the caller omits one.
    #[default]
    #[serde(rename = "15s")]
    #[strum(serialize = "15s")]
    Short,
    #[serde(rename = "30s")]
    #[strum(serialize = "30s")]
    Medium,
    #[serde(rename = "45s")]
    #[strum(serialize = "45s")]
    Long,
}

/// Requested narration voice for audio generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum VoiceGender {
    Male,
    #[default]
    Female,
    Duo,
}

/// Aspect ratio selector for image generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    #[strum(serialize = "1:1")]
    Square,
    #[serde(rename = "9:16")]
    #[strum(serialize = "9:16")]
    Portrait,
}

/// User-supplied generation parameters for one content request.
///
/// Required-field validation (non-empty business name, topic where the
/// feature needs one) is the caller's responsibility; the request builder
/// accepts any `FormInput` and applies stable defaults to the optional
/// refinements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    pub business_type: String,
    pub business_name: String,
    pub city: String,
    pub language: Language,
    pub tone: Tone,
    /// Free-text offer/topic details. Empty for profile-driven features.
    #[serde(default)]
    pub offer_details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub festival_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<ClipDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_gender: Option<VoiceGender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_style: Option<String>,
    /// Base64-encoded logo image for compositing onto generated assets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// A request handed to the text-generation capability.
///
/// Produced by the engine's request builder: `system` carries the fixed
/// schema instruction, `body` the JSON-encoded user parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub system: String,
    pub body: String,
}

/// Raw text returned by the text-generation capability.
#[derive(Debug, Clone)]
pub struct TextResponse {
    pub text: String,
    /// Model identifier that produced the reply.
    pub model: String,
}

/// An inline base64-encoded asset (image or audio) returned by a capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineAsset {
    pub mime_type: String,
    /// Base64-encoded payload.
    pub data: String,
}

/// A reference to a generated video resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoHandle {
    pub uri: String,
}

/// A persisted user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_name: String,
    pub business_type: String,
    pub city: String,
    pub default_language: Language,
    pub plan: PlanTier,
}

/// A partial profile update; `None` fields are left untouched by upserts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanTier>,
}

/// A persisted generation record.
///
/// Created only for successful generations, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    /// ISO-8601 UTC creation timestamp.
    pub created_at: String,
    pub feature: FeatureType,
    pub input: FormInput,
    pub output: crate::envelope::ResponseEnvelope,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn plan_tier_wire_names() {
        assert_eq!(serde_json::to_value(PlanTier::Free).unwrap(), "free");
        assert_eq!(serde_json::to_value(PlanTier::Paid).unwrap(), "paid");
        assert_eq!(PlanTier::from_str("paid").unwrap(), PlanTier::Paid);
    }

    #[test]
    fn feature_type_round_trips() {
        for feature in [
            FeatureType::Instagram,
            FeatureType::Whatsapp,
            FeatureType::Reels,
            FeatureType::Festival,
            FeatureType::Calendar,
            FeatureType::Gmb,
            FeatureType::Poster,
        ] {
            let s = feature.to_string();
            assert_eq!(FeatureType::from_str(&s).unwrap(), feature);
            let json = serde_json::to_value(feature).unwrap();
            assert_eq!(json, s);
            let back: FeatureType = serde_json::from_value(json).unwrap();
            assert_eq!(back, feature);
        }
    }

    #[test]
    fn feature_type_tolerates_long_form_echoes() {
        // The model sometimes echoes descriptive type names instead of the
        // request's feature id.
        let f: FeatureType = serde_json::from_str("\"instagram_caption\"").unwrap();
        assert_eq!(f, FeatureType::Instagram);
        let f: FeatureType = serde_json::from_str("\"reels_script\"").unwrap();
        assert_eq!(f, FeatureType::Reels);
        let f: FeatureType = serde_json::from_str("\"poster_copy\"").unwrap();
        assert_eq!(f, FeatureType::Poster);
    }

    #[test]
    fn premium_and_topic_rules() {
        assert!(FeatureType::Calendar.is_premium());
        assert!(FeatureType::Gmb.is_premium());
        assert!(!FeatureType::Instagram.is_premium());

        assert!(FeatureType::Instagram.requires_topic());
        assert!(FeatureType::Festival.requires_topic());
        assert!(!FeatureType::Calendar.requires_topic());
        assert!(!FeatureType::Gmb.requires_topic());
    }

    #[test]
    fn clip_duration_wire_names() {
        assert_eq!(serde_json::to_value(ClipDuration::Short).unwrap(), "15s");
        assert_eq!(serde_json::to_value(ClipDuration::Long).unwrap(), "45s");
        assert_eq!(ClipDuration::default(), ClipDuration::Short);
    }

    #[test]
    fn aspect_ratio_wire_names() {
        assert_eq!(serde_json::to_value(AspectRatio::Square).unwrap(), "1:1");
        assert_eq!(serde_json::to_value(AspectRatio::Portrait).unwrap(), "9:16");
    }

    #[test]
    fn form_input_omits_absent_optionals() {
        let input = FormInput {
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
        };
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("festival_name").is_none());
        assert!(json.get("logo").is_none());
        assert_eq!(json["language"], "Hinglish");
    }
}
