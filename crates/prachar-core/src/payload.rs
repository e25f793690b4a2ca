// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical per-feature payload shapes and the alias-coercion boundary.
//!
//! The upstream model does not always honor the contracted key names: caption
//! posts arrive under `posts`, `options`, `captions`, or as a bare object;
//! message packs under `messages` or `variants`; hashtags as an array or one
//! space-separated string. All of that tolerance lives in [`coerce`]; the
//! rest of the workspace only ever sees canonical [`FeaturePayload`] values.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::FeatureType;

/// Why a payload could not be coerced into its feature's canonical shape.
#[derive(Debug, Error)]
pub enum CoerceError {
    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("payload carries no {0}")]
    MissingContent(&'static str),

    #[error("payload shape mismatch: {0}")]
    Shape(#[from] serde_json::Error),
}

/// The canonical data payload of a successful envelope, one variant per
/// [`FeatureType`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeaturePayload {
    Instagram(InstagramPayload),
    Whatsapp(WhatsappPayload),
    Reels(ReelsPayload),
    Festival(FestivalPack),
    Calendar(CalendarPayload),
    Gmb(ListingPack),
    Poster(PosterCopy),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstagramPayload {
    pub posts: Vec<CaptionPost>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub caption: String,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub hashtags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatsappPayload {
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelsPayload {
    pub scripts: Vec<ReelScript>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelScript {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_style: Option<String>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual: Option<String>,
    #[serde(default, alias = "voiceover", skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_overlay: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FestivalPack {
    pub caption: String,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub wishes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_subheadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_idea: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarPayload {
    pub calendar: Vec<CalendarEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEntry {
    #[serde(deserialize_with = "number_or_string")]
    pub day: String,
    #[serde(default)]
    pub platform: String,
    pub topic: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPack {
    #[serde(alias = "description")]
    pub business_description: String,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default, alias = "replies", deserialize_with = "string_or_seq")]
    pub review_replies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterCopy {
    #[serde(alias = "headline")]
    pub poster_headline: String,
    #[serde(default, alias = "subheadline", skip_serializing_if = "Option::is_none")]
    pub poster_subheadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
}

/// Coerce a raw `data` value into the canonical payload for `feature`.
///
/// Tolerated aliases per feature are listed on each branch. A value that
/// cannot be coerced is an error; callers treat this as a retryable
/// generation failure, never as a panic.
pub fn coerce(feature: FeatureType, data: &Value) -> Result<FeaturePayload, CoerceError> {
    let obj = data.as_object().ok_or(CoerceError::NotAnObject)?;

    match feature {
        FeatureType::Instagram => {
            // `posts` | `options` | `captions` | bare single-post object.
            let items = match first_array(obj, &["posts", "options", "captions"]) {
                Some(items) => items.clone(),
                None if obj.contains_key("caption") => vec![data.clone()],
                None => return Err(CoerceError::MissingContent("posts")),
            };
            if items.is_empty() {
                return Err(CoerceError::MissingContent("posts"));
            }
            let posts = items
                .into_iter()
                .map(serde_json::from_value::<CaptionPost>)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(FeaturePayload::Instagram(InstagramPayload { posts }))
        }
        FeatureType::Whatsapp => {
            // `messages` | `variants` | `options`; entries are bare strings or
            // `{text}` / `{content}` / `{message}` objects.
            let items = first_array(obj, &["messages", "variants", "options"])
                .ok_or(CoerceError::MissingContent("messages"))?;
            let messages: Vec<String> = items.iter().filter_map(message_text).collect();
            if messages.is_empty() {
                return Err(CoerceError::MissingContent("messages"));
            }
            Ok(FeaturePayload::Whatsapp(WhatsappPayload { messages }))
        }
        FeatureType::Reels => {
            // `scripts` | `options` | bare single-script object.
            let items = match first_array(obj, &["scripts", "options"]) {
                Some(items) => items.clone(),
                None if obj.contains_key("scenes") || obj.contains_key("hook") => {
                    vec![data.clone()]
                }
                None => return Err(CoerceError::MissingContent("scripts")),
            };
            if items.is_empty() {
                return Err(CoerceError::MissingContent("scripts"));
            }
            let scripts = items
                .into_iter()
                .map(serde_json::from_value::<ReelScript>)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(FeaturePayload::Reels(ReelsPayload { scripts }))
        }
        FeatureType::Festival => {
            let pack: FestivalPack = serde_json::from_value(data.clone())?;
            Ok(FeaturePayload::Festival(pack))
        }
        FeatureType::Calendar => {
            let items = first_array(obj, &["calendar", "days", "plan"])
                .ok_or(CoerceError::MissingContent("calendar entries"))?;
            if items.is_empty() {
                return Err(CoerceError::MissingContent("calendar entries"));
            }
            let calendar = items
                .iter()
                .cloned()
                .map(serde_json::from_value::<CalendarEntry>)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(FeaturePayload::Calendar(CalendarPayload { calendar }))
        }
        FeatureType::Gmb => {
            let pack: ListingPack = serde_json::from_value(data.clone())?;
            Ok(FeaturePayload::Gmb(pack))
        }
        FeatureType::Poster => {
            let copy: PosterCopy = serde_json::from_value(data.clone())?;
            Ok(FeaturePayload::Poster(copy))
        }
    }
}

/// Return the first present array value among the given keys.
fn first_array<'a>(
    obj: &'a serde_json::Map<String, Value>,
    keys: &[&str],
) -> Option<&'a Vec<Value>> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Value::as_array))
}

/// Extract message text from a bare string or a wrapping object.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => ["text", "content", "message"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))
            .map(str::to_owned),
        _ => None,
    }
}

/// Deserialize either a list of strings or one whitespace-separated string.
fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<String>),
        One(String),
    }

    match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => Ok(items),
        OneOrMany::One(s) => Ok(s.split_whitespace().map(str::to_owned).collect()),
    }
}

/// Deserialize either a JSON number or a string into a string.
fn number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(i64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n.to_string()),
        NumOrStr::Str(s) => Ok(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn instagram_canonical_key() {
        let data = json!({
            "posts": [{"caption": "Shine on", "hashtags": ["#salon", "#glow"]}]
        });
        let payload = coerce(FeatureType::Instagram, &data).unwrap();
        match payload {
            FeaturePayload::Instagram(p) => {
                assert_eq!(p.posts.len(), 1);
                assert_eq!(p.posts[0].caption, "Shine on");
                assert_eq!(p.posts[0].hashtags, vec!["#salon", "#glow"]);
            }
            other => panic!("expected instagram payload, got {other:?}"),
        }
    }

    #[test]
    fn instagram_options_and_captions_aliases() {
        for key in ["options", "captions"] {
            let data = json!({ key: [{"caption": "A", "hashtags": []}] });
            let payload = coerce(FeatureType::Instagram, &data).unwrap();
            assert!(matches!(payload, FeaturePayload::Instagram(_)), "alias {key}");
        }
    }

    #[test]
    fn instagram_bare_object_promoted_to_single_post() {
        let data = json!({"caption": "Solo", "hashtags": "#one #two"});
        let payload = coerce(FeatureType::Instagram, &data).unwrap();
        match payload {
            FeaturePayload::Instagram(p) => {
                assert_eq!(p.posts.len(), 1);
                // space-separated hashtag string split into a list
                assert_eq!(p.posts[0].hashtags, vec!["#one", "#two"]);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn instagram_missing_posts_rejected() {
        let data = json!({"something_else": []});
        assert!(coerce(FeatureType::Instagram, &data).is_err());
        let data = json!({"posts": []});
        assert!(coerce(FeatureType::Instagram, &data).is_err());
    }

    #[test]
    fn whatsapp_string_and_object_entries() {
        let data = json!({
            "variants": ["Plain message", {"text": "Wrapped message"}, {"content": "Alt key"}]
        });
        let payload = coerce(FeatureType::Whatsapp, &data).unwrap();
        match payload {
            FeaturePayload::Whatsapp(p) => {
                assert_eq!(
                    p.messages,
                    vec!["Plain message", "Wrapped message", "Alt key"]
                );
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn reels_scene_voiceover_alias() {
        let data = json!({
            "scripts": [{
                "title": "Launch",
                "hook": "Wait for it",
                "scenes": [{"time": "0-3s", "visual": "storefront", "voiceover": "Namaste!"}],
                "cta": "Visit us"
            }]
        });
        let payload = coerce(FeatureType::Reels, &data).unwrap();
        match payload {
            FeaturePayload::Reels(p) => {
                assert_eq!(p.scripts[0].scenes[0].audio.as_deref(), Some("Namaste!"));
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn festival_requires_caption() {
        let data = json!({"wishes": ["Happy Diwali!"]});
        assert!(coerce(FeatureType::Festival, &data).is_err());

        let data = json!({"caption": "Diwali magic", "wishes": ["Shubh Deepavali"]});
        let payload = coerce(FeatureType::Festival, &data).unwrap();
        assert!(matches!(payload, FeaturePayload::Festival(_)));
    }

    #[test]
    fn calendar_numeric_days_become_strings() {
        let data = json!({
            "calendar": [
                {"day": 1, "platform": "Instagram", "topic": "Intro", "description": "Meet us"},
                {"day": "Day 2", "platform": "WhatsApp", "topic": "Offer", "description": "Deal"}
            ]
        });
        let payload = coerce(FeatureType::Calendar, &data).unwrap();
        match payload {
            FeaturePayload::Calendar(p) => {
                assert_eq!(p.calendar[0].day, "1");
                assert_eq!(p.calendar[1].day, "Day 2");
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn gmb_description_alias() {
        let data = json!({
            "description": "Best salon in Andheri",
            "faqs": [{"question": "Timings?", "answer": "10am-8pm"}]
        });
        let payload = coerce(FeatureType::Gmb, &data).unwrap();
        match payload {
            FeaturePayload::Gmb(p) => {
                assert_eq!(p.business_description, "Best salon in Andheri");
                assert_eq!(p.faqs.len(), 1);
                assert!(p.review_replies.is_empty());
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn poster_headline_alias() {
        let data = json!({"headline": "Mega Sale", "cta": "Shop now"});
        let payload = coerce(FeatureType::Poster, &data).unwrap();
        match payload {
            FeaturePayload::Poster(p) => {
                assert_eq!(p.poster_headline, "Mega Sale");
                assert_eq!(p.cta.as_deref(), Some("Shop now"));
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn non_object_payload_rejected() {
        assert!(matches!(
            coerce(FeatureType::Poster, &json!("just a string")),
            Err(CoerceError::NotAnObject)
        ));
    }

    #[test]
    fn canonical_payload_serializes_flat() {
        let payload = FeaturePayload::Poster(PosterCopy {
            poster_headline: "H".into(),
            poster_subheadline: None,
            cta: None,
        });
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, json!({"poster_headline": "H"}));
    }
}
