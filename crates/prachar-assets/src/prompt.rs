// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asset prompt construction.
//!
//! Prompts mix the feature kind, a slice of the form input (business name,
//! category, topic), an optional content hint pulled from the generated text
//! payload, and one randomly drawn style qualifier so repeated generations
//! for the same content do not all look alike.

use prachar_core::payload::FeaturePayload;
use prachar_core::types::{AspectRatio, FormInput};
use prachar_core::FeatureType;
use rand::seq::SliceRandom;

/// Style qualifiers drawn at random into image prompts.
pub const IMAGE_STYLES: [&str; 6] = [
    "warm golden-hour lighting",
    "bold studio lighting",
    "soft pastel palette",
    "vibrant festive colors",
    "clean minimal composition",
    "rich editorial look",
];

/// Style qualifiers drawn at random into video prompts.
pub const VIDEO_STYLES: [&str; 4] = [
    "smooth gimbal movement",
    "energetic quick cuts",
    "cinematic shallow depth of field",
    "bright handheld documentary feel",
];

/// The aspect ratio a feature's imagery uses: vertical for short-video and
/// festival-story surfaces, square for feed posts and posters.
pub fn aspect_for(feature: FeatureType) -> AspectRatio {
    match feature {
        FeatureType::Reels | FeatureType::Festival => AspectRatio::Portrait,
        _ => AspectRatio::Square,
    }
}

/// A short content hint lifted from a generated payload, used to ground the
/// asset prompt in what the text generation actually produced.
pub fn payload_context(payload: &FeaturePayload) -> Option<String> {
    let text = match payload {
        FeaturePayload::Instagram(p) => p.posts.first().map(|post| post.caption.clone()),
        FeaturePayload::Reels(p) => p.scripts.first().and_then(|s| s.hook.clone()),
        FeaturePayload::Festival(p) => p
            .poster_headline
            .clone()
            .or_else(|| Some(p.caption.clone())),
        FeaturePayload::Poster(p) => Some(p.poster_headline.clone()),
        FeaturePayload::Whatsapp(p) => p.messages.first().cloned(),
        FeaturePayload::Gmb(p) => Some(p.business_description.clone()),
        FeaturePayload::Calendar(_) => None,
    }?;
    // keep the hint short; prompts degrade when stuffed with a full caption
    Some(text.chars().take(100).collect())
}

/// Build an image-generation prompt.
pub fn image_prompt(feature: FeatureType, input: &FormInput, context: Option<&str>) -> String {
    let style = IMAGE_STYLES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(IMAGE_STYLES[0]);

    let subject = match feature {
        FeatureType::Festival => format!(
            "A festival poster background for {}, a {} in {}. Festive atmosphere with space for text overlay.",
            input.business_name, input.business_type, input.city
        ),
        FeatureType::Reels => format!(
            "A vertical video cover image for {}, a {}.",
            input.business_name, input.business_type
        ),
        FeatureType::Instagram => format!(
            "A lifestyle social media photo for {}, a {}.",
            input.business_name, input.business_type
        ),
        _ => format!(
            "A professional marketing image for {}, a {}.",
            input.business_name, input.business_type
        ),
    };

    let mut prompt = format!(
        "Create a professional, high-quality social media marketing image. {subject}"
    );
    if !input.offer_details.is_empty() {
        prompt.push_str(&format!(" Theme: {}.", input.offer_details));
    }
    if let Some(context) = context {
        prompt.push_str(&format!(" Context: {context}."));
    }
    prompt.push_str(&format!(
        " Photorealistic, advertising style, {style}, no text, 4k."
    ));
    prompt
}

/// Build a video-generation prompt.
pub fn video_prompt(input: &FormInput, context: Option<&str>) -> String {
    let style = VIDEO_STYLES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(VIDEO_STYLES[0]);
    let visual_style = input.visual_style.as_deref().unwrap_or("Cinematic Live Action");

    let mut prompt = format!(
        "A short vertical promotional video for {}, a {} in {}. Visual style: {visual_style}.",
        input.business_name, input.business_type, input.city
    );
    if !input.offer_details.is_empty() {
        prompt.push_str(&format!(" Featuring: {}.", input.offer_details));
    }
    if let Some(context) = context {
        prompt.push_str(&format!(" Opening beat: {context}."));
    }
    prompt.push_str(&format!(" {style}, no on-screen text."));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use prachar_core::payload::{CaptionPost, InstagramPayload, PosterCopy};
    use prachar_core::types::{Language, Tone};

    fn input() -> FormInput {
        FormInput {
            business_type: "Bakery".into(),
            business_name: "Crumb & Co".into(),
            city: "Pune".into(),
            language: Language::English,
            tone: Tone::Fun,
            offer_details: "fresh mango cakes".into(),
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

    #[test]
    fn aspect_selection_per_feature() {
        assert_eq!(aspect_for(FeatureType::Reels), AspectRatio::Portrait);
        assert_eq!(aspect_for(FeatureType::Festival), AspectRatio::Portrait);
        assert_eq!(aspect_for(FeatureType::Instagram), AspectRatio::Square);
        assert_eq!(aspect_for(FeatureType::Poster), AspectRatio::Square);
    }

    #[test]
    fn image_prompt_carries_business_topic_and_style() {
        let prompt = image_prompt(FeatureType::Instagram, &input(), Some("Mango season is here"));
        assert!(prompt.contains("Crumb & Co"));
        assert!(prompt.contains("Bakery"));
        assert!(prompt.contains("fresh mango cakes"));
        assert!(prompt.contains("Mango season is here"));
        assert!(
            IMAGE_STYLES.iter().any(|style| prompt.contains(style)),
            "prompt must carry one style qualifier: {prompt}"
        );
    }

    #[test]
    fn video_prompt_uses_visual_style() {
        let mut form = input();
        form.visual_style = Some("3D Animation".into());
        let prompt = video_prompt(&form, None);
        assert!(prompt.contains("3D Animation"));
        assert!(VIDEO_STYLES.iter().any(|style| prompt.contains(style)));
    }

    #[test]
    fn payload_context_prefers_primary_text() {
        let payload = FeaturePayload::Instagram(InstagramPayload {
            posts: vec![CaptionPost {
                title: None,
                caption: "Mango magic in every slice".into(),
                hashtags: vec![],
                hook: None,
                cta: None,
            }],
        });
        assert_eq!(
            payload_context(&payload).as_deref(),
            Some("Mango magic in every slice")
        );

        let poster = FeaturePayload::Poster(PosterCopy {
            poster_headline: "Half Price Week".into(),
            poster_subheadline: None,
            cta: None,
        });
        assert_eq!(payload_context(&poster).as_deref(), Some("Half Price Week"));
    }

    #[test]
    fn payload_context_truncates_long_captions() {
        let long = "x".repeat(500);
        let payload = FeaturePayload::Instagram(InstagramPayload {
            posts: vec![CaptionPost {
                title: None,
                caption: long,
                hashtags: vec![],
                hook: None,
                cta: None,
            }],
        });
        assert_eq!(payload_context(&payload).unwrap().len(), 100);
    }
}
