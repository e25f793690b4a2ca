// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits for the generative service boundaries.
//!
//! Text generation is the primary capability: the orchestrator drives it
//! through its retry loop and the reply feeds the response normalizer. The
//! asset capabilities (image, video, audio) return `Ok(None)` when the
//! service answered but produced no usable payload; hard failures are `Err`
//! and are swallowed to `None` by the asset wrappers, never by the clients.

use async_trait::async_trait;

use crate::error::PracharError;
use crate::traits::adapter::Adapter;
use crate::types::{AspectRatio, InlineAsset, TextRequest, TextResponse, VideoHandle, VoiceGender};

/// The text-generation capability behind the content pipeline.
#[async_trait]
pub trait TextCapability: Adapter {
    /// Sends one generation request and returns the raw model text.
    async fn generate_text(&self, request: TextRequest) -> Result<TextResponse, PracharError>;
}

/// Still-image generation.
#[async_trait]
pub trait ImageCapability: Adapter {
    /// Generates one image for the prompt at the given aspect ratio.
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<Option<InlineAsset>, PracharError>;
}

/// Long-running video generation.
///
/// Implementations own the submit-and-poll lifecycle and return only once
/// the operation completes, fails, or exhausts its poll budget.
#[async_trait]
pub trait VideoCapability: Adapter {
    async fn generate_video(&self, prompt: &str) -> Result<Option<VideoHandle>, PracharError>;
}

/// Text-to-speech audio generation.
#[async_trait]
pub trait AudioCapability: Adapter {
    async fn generate_audio(
        &self,
        text: &str,
        voice: VoiceGender,
    ) -> Result<Option<InlineAsset>, PracharError>;
}
