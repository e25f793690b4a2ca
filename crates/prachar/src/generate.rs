// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `generate` subcommand: runs the full pipeline for one feature.
//!
//! Profile values fill any business fields the flags omit. Store failures are
//! deliberately non-fatal: a generation that succeeded is printed even when
//! history or usage persistence is unavailable.

use std::str::FromStr;
use std::sync::Arc;

use clap::Args;
use tracing::warn;

use prachar_assets::composite::{composite_logo, Corner};
use prachar_assets::{aspect_for, image_prompt, payload_context, video_prompt, AssetGenerator};
use prachar_config::PracharConfig;
use prachar_core::types::{
    ClipDuration, FormInput, HistoryItem, Language, Tone, UserProfile, VoiceGender,
};
use prachar_core::{FeatureType, PlanTier, PracharError, StoreAdapter};
use prachar_engine::GenerationOrchestrator;
use prachar_gemini::GeminiClient;
use prachar_storage::SqliteStore;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Content feature: instagram, whatsapp, reels, festival, calendar, gmb, poster.
    pub feature: FeatureType,

    /// Offer/topic details (required except for calendar and gmb).
    #[arg(long, default_value = "")]
    pub topic: String,

    /// Business name; defaults to the saved profile.
    #[arg(long)]
    pub business_name: Option<String>,

    /// Business category; defaults to the saved profile.
    #[arg(long)]
    pub business_type: Option<String>,

    /// City; defaults to the saved profile.
    #[arg(long)]
    pub city: Option<String>,

    /// Output language: Hindi, English, or Hinglish.
    #[arg(long)]
    pub language: Option<Language>,

    /// Tone of voice (Friendly, Professional, Fun, ...).
    #[arg(long)]
    pub tone: Option<Tone>,

    /// Festival name, for festival posts.
    #[arg(long)]
    pub festival: Option<String>,

    /// Clip length for reels: 15s, 30s, or 45s.
    #[arg(long)]
    pub duration: Option<ClipDuration>,

    /// Content objective (Awareness, Sales/Offer, ...).
    #[arg(long)]
    pub objective: Option<String>,

    /// Hook style for captions and scripts.
    #[arg(long)]
    pub hook_style: Option<String>,

    /// Target audience description.
    #[arg(long)]
    pub target_audience: Option<String>,

    /// Narration voice: Male, Female, or Duo.
    #[arg(long)]
    pub voice: Option<VoiceGender>,

    /// Visual style hint for video prompts.
    #[arg(long)]
    pub visual_style: Option<String>,

    /// Plan override: free or paid. Defaults to the saved profile's plan.
    #[arg(long)]
    pub plan: Option<PlanTier>,

    /// Also generate a marketing image.
    #[arg(long)]
    pub image: bool,

    /// Also generate a short promo video (long-running).
    #[arg(long)]
    pub video: bool,

    /// Also generate a voiceover for the content.
    #[arg(long)]
    pub audio: bool,

    /// Logo image file to composite onto the generated image.
    #[arg(long)]
    pub logo: Option<std::path::PathBuf>,

    /// Corner for the composited logo.
    #[arg(long, default_value = "bottom-right", value_parser = parse_corner)]
    pub logo_corner: Corner,

    /// Output path for the generated image.
    #[arg(long, default_value = "prachar-image.png")]
    pub image_out: std::path::PathBuf,

    /// Output path for the generated audio.
    #[arg(long, default_value = "prachar-audio.bin")]
    pub audio_out: std::path::PathBuf,
}

fn parse_corner(value: &str) -> Result<Corner, String> {
    match value {
        "top-left" => Ok(Corner::TopLeft),
        "top-right" => Ok(Corner::TopRight),
        "bottom-left" => Ok(Corner::BottomLeft),
        "bottom-right" => Ok(Corner::BottomRight),
        other => Err(format!(
            "unknown corner `{other}` (expected top-left, top-right, bottom-left, bottom-right)"
        )),
    }
}

pub async fn run(config: &PracharConfig, args: GenerateArgs) -> Result<(), PracharError> {
    // Persistence is a collaborator, not a dependency: carry on without it.
    let store = open_store(config).await;
    let profile = match &store {
        Some(store) => store
            .get_profile(&config.app.user_id)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "profile load failed, using flag values only");
                None
            }),
        None => None,
    };

    let input = build_form_input(&args, profile.as_ref())?;
    let plan = args
        .plan
        .or(profile.as_ref().map(|p| p.plan))
        .unwrap_or(PlanTier::Free);

    if args.feature.is_premium() && plan == PlanTier::Free {
        return Err(PracharError::Config(format!(
            "{} is a paid-plan feature; run `prachar profile upgrade` first",
            args.feature
        )));
    }
    if args.feature.requires_topic() && input.offer_details.trim().is_empty() {
        return Err(PracharError::Config(
            "a non-empty --topic is required for this feature".into(),
        ));
    }

    let client = Arc::new(GeminiClient::new(config.gemini.clone())?);
    let mut orchestrator = GenerationOrchestrator::new(client.clone(), &config.limits);
    if let Some(store) = &store {
        orchestrator = orchestrator.with_usage_store(store.clone(), &config.app.user_id);
        if let Err(e) = orchestrator.hydrate_usage().await {
            warn!(error = %e, "usage hydration failed, starting from zero");
        }
    }

    let envelope = orchestrator.generate(args.feature, &input, plan).await;
    println!(
        "{}",
        serde_json::to_string_pretty(&envelope).map_err(|e| PracharError::Internal(e.to_string()))?
    );

    if envelope.is_success() {
        if let Some(store) = &store {
            let item = HistoryItem {
                id: uuid::Uuid::new_v4().to_string(),
                created_at: chrono::Utc::now()
                    .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                    .to_string(),
                feature: args.feature,
                input: input.clone(),
                output: envelope.clone(),
            };
            if let Err(e) = store.append_history(&config.app.user_id, &item).await {
                warn!(error = %e, "history append failed; generation result is unaffected");
            }
        }
    }

    if !envelope.is_success() {
        return Ok(());
    }

    // Assets ride on a successful text generation; each is best-effort.
    let assets = AssetGenerator::new(client.clone(), client.clone(), client.clone());
    let context = envelope.data.as_ref().and_then(payload_context);

    if args.image {
        generate_image(&args, &assets, &input, context.as_deref()).await;
    }
    // video before audio, sequentially; asset calls are never parallel
    if args.video {
        let prompt = video_prompt(&input, context.as_deref());
        match assets.video(&prompt).await {
            Some(handle) => println!("video: {}", handle.uri),
            None => println!("video: couldn't generate this time, try again"),
        }
    }
    if args.audio {
        let text = context.clone().unwrap_or_else(|| input.offer_details.clone());
        let voice = input.voice_gender.unwrap_or(VoiceGender::Female);
        match assets.audio(&text, voice).await {
            Some(asset) => match save_base64(&args.audio_out, &asset.data) {
                Ok(()) => println!("audio: saved to {}", args.audio_out.display()),
                Err(e) => warn!(error = %e, "could not save audio"),
            },
            None => println!("audio: couldn't generate this time, try again"),
        }
    }

    Ok(())
}

async fn open_store(config: &PracharConfig) -> Option<Arc<SqliteStore>> {
    let store = SqliteStore::new(config.storage.clone());
    match store.initialize().await {
        Ok(()) => Some(Arc::new(store)),
        Err(e) => {
            warn!(error = %e, "store unavailable; profiles, history, and usage persistence disabled");
            None
        }
    }
}

fn build_form_input(
    args: &GenerateArgs,
    profile: Option<&UserProfile>,
) -> Result<FormInput, PracharError> {
    let from_profile = |flag: &Option<String>, stored: Option<&String>| -> String {
        flag.clone()
            .or_else(|| stored.filter(|s| !s.is_empty()).cloned())
            .unwrap_or_default()
    };

    let business_name = from_profile(
        &args.business_name,
        profile.map(|p| &p.business_name),
    );
    if business_name.trim().is_empty() {
        return Err(PracharError::Config(
            "no business name: pass --business-name or save a profile".into(),
        ));
    }

    Ok(FormInput {
        business_name,
        business_type: from_profile(&args.business_type, profile.map(|p| &p.business_type)),
        city: from_profile(&args.city, profile.map(|p| &p.city)),
        language: args
            .language
            .or(profile.map(|p| p.default_language))
            .unwrap_or(Language::Hinglish),
        tone: args.tone.unwrap_or(Tone::Friendly),
        offer_details: args.topic.clone(),
        festival_name: args.festival.clone(),
        duration: args.duration,
        objective: args.objective.clone(),
        hook_style: args.hook_style.clone(),
        target_audience: args.target_audience.clone(),
        voice_gender: args.voice,
        visual_style: args.visual_style.clone(),
        logo: None,
    })
}

async fn generate_image(
    args: &GenerateArgs,
    assets: &AssetGenerator,
    input: &FormInput,
    context: Option<&str>,
) {
    let prompt = image_prompt(args.feature, input, context);
    let Some(asset) = assets.image(&prompt, aspect_for(args.feature)).await else {
        println!("image: couldn't generate this time, try again");
        return;
    };

    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    let bytes = match BASE64.decode(asset.data.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "image payload is not valid base64");
            return;
        }
    };

    let result = match &args.logo {
        Some(logo_path) => {
            image::load_from_memory(&bytes)
                .map(|base| {
                    let logo_bytes = std::fs::read(logo_path).unwrap_or_default();
                    composite_logo(&base, &logo_bytes, args.logo_corner)
                })
                .and_then(|img| img.save(&args.image_out))
                .map_err(|e| e.to_string())
        }
        None => std::fs::write(&args.image_out, &bytes).map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => println!("image: saved to {}", args.image_out.display()),
        Err(e) => warn!(error = %e, "could not save image"),
    }
}

fn save_base64(path: &std::path::Path, data: &str) -> Result<(), PracharError> {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    let bytes = BASE64
        .decode(data.as_bytes())
        .map_err(|e| PracharError::Internal(format!("asset payload is not valid base64: {e}")))?;
    std::fs::write(path, bytes).map_err(|e| PracharError::Internal(e.to_string()))
}

// clap derives FromStr-based parsing for the enum-typed flags; keep the
// wire-name round trip honest here since the CLI is the main caller.
#[allow(dead_code)]
fn _assert_flag_enums_parse() {
    let _ = FeatureType::from_str("instagram");
    let _ = Language::from_str("Hinglish");
    let _ = ClipDuration::from_str("30s");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(feature: FeatureType) -> GenerateArgs {
        GenerateArgs {
            feature,
            topic: "50% off bridal makeup".into(),
            business_name: Some("Glow Salon".into()),
            business_type: Some("Salon".into()),
            city: Some("Mumbai".into()),
            language: None,
            tone: None,
            festival: None,
            duration: None,
            objective: None,
            hook_style: None,
            target_audience: None,
            voice: None,
            visual_style: None,
            plan: None,
            image: false,
            video: false,
            audio: false,
            logo: None,
            logo_corner: Corner::BottomRight,
            image_out: "prachar-image.png".into(),
            audio_out: "prachar-audio.bin".into(),
        }
    }

    #[test]
    fn form_input_prefers_flags_over_profile() {
        let profile = UserProfile {
            name: "Amit".into(),
            email: String::new(),
            phone: String::new(),
            business_name: "Old Name".into(),
            business_type: "Gym".into(),
            city: "Delhi".into(),
            default_language: Language::Hindi,
            plan: PlanTier::Free,
        };
        let input = build_form_input(&args(FeatureType::Instagram), Some(&profile)).unwrap();
        assert_eq!(input.business_name, "Glow Salon");
        assert_eq!(input.business_type, "Salon");
        // language falls back to the profile when no flag is given
        assert_eq!(input.language, Language::Hindi);
    }

    #[test]
    fn missing_business_name_is_an_error() {
        let mut a = args(FeatureType::Instagram);
        a.business_name = None;
        let err = build_form_input(&a, None).unwrap_err();
        assert!(err.to_string().contains("business name"));
    }

    #[test]
    fn corner_parser_accepts_known_corners() {
        assert_eq!(parse_corner("top-left").unwrap(), Corner::TopLeft);
        assert_eq!(parse_corner("bottom-right").unwrap(), Corner::BottomRight);
        assert!(parse_corner("middle").is_err());
    }
}
