// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Null-on-failure wrappers over the asset capabilities.
//!
//! Assets are garnish: a missing image, video, or voiceover must never turn
//! an already-successful text generation into an error. Each wrapper makes
//! exactly one attempt and maps every failure to `None`; callers present
//! absence as "couldn't generate, try again".

use std::sync::Arc;

use prachar_core::types::{AspectRatio, InlineAsset, VideoHandle, VoiceGender};
use prachar_core::{AudioCapability, ImageCapability, VideoCapability};
use tracing::warn;

/// Stateless facade over the three asset capabilities.
pub struct AssetGenerator {
    image: Arc<dyn ImageCapability>,
    video: Arc<dyn VideoCapability>,
    audio: Arc<dyn AudioCapability>,
}

impl AssetGenerator {
    pub fn new(
        image: Arc<dyn ImageCapability>,
        video: Arc<dyn VideoCapability>,
        audio: Arc<dyn AudioCapability>,
    ) -> Self {
        Self { image, video, audio }
    }

    /// One image attempt; `None` on any failure or empty reply.
    pub async fn image(&self, prompt: &str, aspect_ratio: AspectRatio) -> Option<InlineAsset> {
        match self.image.generate_image(prompt, aspect_ratio).await {
            Ok(asset) => asset,
            Err(e) => {
                warn!(error = %e, "image generation failed");
                None
            }
        }
    }

    /// One video attempt (the capability owns its polling); `None` on failure.
    pub async fn video(&self, prompt: &str) -> Option<VideoHandle> {
        match self.video.generate_video(prompt).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "video generation failed");
                None
            }
        }
    }

    /// One audio attempt; `None` on failure.
    pub async fn audio(&self, text: &str, voice: VoiceGender) -> Option<InlineAsset> {
        match self.audio.generate_audio(text, voice).await {
            Ok(asset) => asset,
            Err(e) => {
                warn!(error = %e, "audio generation failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prachar_test_utils::{MockAudioCapability, MockImageCapability, MockVideoCapability};

    fn sample_asset() -> InlineAsset {
        InlineAsset {
            mime_type: "image/png".into(),
            data: "aW1hZ2U=".into(),
        }
    }

    fn generator(
        image: MockImageCapability,
        video: MockVideoCapability,
        audio: MockAudioCapability,
    ) -> AssetGenerator {
        AssetGenerator::new(Arc::new(image), Arc::new(video), Arc::new(audio))
    }

    #[tokio::test]
    async fn image_success_passes_through() {
        let assets = generator(
            MockImageCapability::returning(Some(sample_asset())),
            MockVideoCapability::returning(None),
            MockAudioCapability::returning(None),
        );
        let asset = assets.image("prompt", AspectRatio::Square).await.unwrap();
        assert_eq!(asset.mime_type, "image/png");
    }

    #[tokio::test]
    async fn image_failure_becomes_none() {
        let assets = generator(
            MockImageCapability::failing("quota exceeded"),
            MockVideoCapability::returning(None),
            MockAudioCapability::returning(None),
        );
        assert!(assets.image("prompt", AspectRatio::Square).await.is_none());
    }

    #[tokio::test]
    async fn video_failure_becomes_none() {
        let assets = generator(
            MockImageCapability::returning(None),
            MockVideoCapability::failing("operation timed out"),
            MockAudioCapability::returning(None),
        );
        assert!(assets.video("prompt").await.is_none());
    }

    #[tokio::test]
    async fn video_success_passes_handle() {
        let assets = generator(
            MockImageCapability::returning(None),
            MockVideoCapability::returning(Some(VideoHandle {
                uri: "https://video.example/v.mp4".into(),
            })),
            MockAudioCapability::returning(None),
        );
        assert_eq!(
            assets.video("prompt").await.unwrap().uri,
            "https://video.example/v.mp4"
        );
    }

    #[tokio::test]
    async fn audio_forwards_requested_voice() {
        let audio = MockAudioCapability::returning(Some(InlineAsset {
            mime_type: "audio/L16;rate=24000".into(),
            data: "cGNt".into(),
        }));
        let assets = AssetGenerator::new(
            Arc::new(MockImageCapability::returning(None)),
            Arc::new(MockVideoCapability::returning(None)),
            Arc::new(audio),
        );
        let asset = assets.audio("Namaste!", VoiceGender::Male).await;
        assert!(asset.is_some());
    }

    #[tokio::test]
    async fn audio_failure_becomes_none() {
        let assets = generator(
            MockImageCapability::returning(None),
            MockVideoCapability::returning(None),
            MockAudioCapability::failing("voice unavailable"),
        );
        assert!(assets.audio("text", VoiceGender::Female).await.is_none());
    }
}
