// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock capability adapters for deterministic testing.
//!
//! `MockTextCapability` replays a FIFO script of outcomes and counts how many
//! times it was invoked, which is what the orchestrator's call-budget tests
//! hinge on. The asset mocks return a fixed outcome per instance.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use prachar_core::traits::adapter::{AdapterKind, HealthStatus};
use prachar_core::types::{
    AspectRatio, InlineAsset, TextRequest, TextResponse, VideoHandle, VoiceGender,
};
use prachar_core::{
    Adapter, AudioCapability, ImageCapability, PracharError, TextCapability, VideoCapability,
};

/// One scripted outcome for a mock text-generation call.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Return this raw text as the model reply.
    Text(String),
    /// Fail with a capability error carrying this message.
    Error(String),
    /// Never resolve; exercises deadline handling.
    Hang,
}

/// A mock text capability that replays scripted replies in order.
///
/// Replies are popped from a FIFO queue. When the queue is empty, a default
/// "mock reply" text is returned. Every invocation bumps the call counter,
/// including hung ones.
#[derive(Clone)]
pub struct MockTextCapability {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    calls: Arc<AtomicU32>,
}

impl MockTextCapability {
    /// Create a mock with an empty reply queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Create a mock pre-loaded with the given replies.
    pub fn with_replies(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Add a reply to the end of the queue.
    pub async fn push(&self, reply: ScriptedReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// How many times `generate_text` has been invoked.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockTextCapability {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for MockTextCapability {
    fn name(&self) -> &str {
        "mock-text"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::Generation
    }

    async fn health_check(&self) -> Result<HealthStatus, PracharError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PracharError> {
        Ok(())
    }
}

#[async_trait]
impl TextCapability for MockTextCapability {
    async fn generate_text(&self, _request: TextRequest) -> Result<TextResponse, PracharError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().await.pop_front();
        match reply {
            Some(ScriptedReply::Text(text)) => Ok(TextResponse {
                text,
                model: "mock-model".into(),
            }),
            Some(ScriptedReply::Error(message)) => Err(PracharError::capability(message)),
            Some(ScriptedReply::Hang) => std::future::pending().await,
            None => Ok(TextResponse {
                text: "mock reply".into(),
                model: "mock-model".into(),
            }),
        }
    }
}

/// A mock image capability with one fixed outcome.
pub struct MockImageCapability {
    outcome: Result<Option<InlineAsset>, String>,
}

impl MockImageCapability {
    pub fn returning(asset: Option<InlineAsset>) -> Self {
        Self { outcome: Ok(asset) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

#[async_trait]
impl Adapter for MockImageCapability {
    fn name(&self) -> &str {
        "mock-image"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::Generation
    }

    async fn health_check(&self) -> Result<HealthStatus, PracharError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PracharError> {
        Ok(())
    }
}

#[async_trait]
impl ImageCapability for MockImageCapability {
    async fn generate_image(
        &self,
        _prompt: &str,
        _aspect_ratio: AspectRatio,
    ) -> Result<Option<InlineAsset>, PracharError> {
        match &self.outcome {
            Ok(asset) => Ok(asset.clone()),
            Err(message) => Err(PracharError::capability(message.clone())),
        }
    }
}

/// A mock video capability with one fixed outcome.
pub struct MockVideoCapability {
    outcome: Result<Option<VideoHandle>, String>,
}

impl MockVideoCapability {
    pub fn returning(handle: Option<VideoHandle>) -> Self {
        Self { outcome: Ok(handle) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

#[async_trait]
impl Adapter for MockVideoCapability {
    fn name(&self) -> &str {
        "mock-video"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::Generation
    }

    async fn health_check(&self) -> Result<HealthStatus, PracharError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PracharError> {
        Ok(())
    }
}

#[async_trait]
impl VideoCapability for MockVideoCapability {
    async fn generate_video(&self, _prompt: &str) -> Result<Option<VideoHandle>, PracharError> {
        match &self.outcome {
            Ok(handle) => Ok(handle.clone()),
            Err(message) => Err(PracharError::capability(message.clone())),
        }
    }
}

/// A mock audio capability with one fixed outcome. Records the voice it was
/// asked for.
pub struct MockAudioCapability {
    outcome: Result<Option<InlineAsset>, String>,
    last_voice: Mutex<Option<VoiceGender>>,
}

impl MockAudioCapability {
    pub fn returning(asset: Option<InlineAsset>) -> Self {
        Self {
            outcome: Ok(asset),
            last_voice: Mutex::new(None),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            last_voice: Mutex::new(None),
        }
    }

    /// The voice requested by the most recent call.
    pub async fn last_voice(&self) -> Option<VoiceGender> {
        *self.last_voice.lock().await
    }
}

#[async_trait]
impl Adapter for MockAudioCapability {
    fn name(&self) -> &str {
        "mock-audio"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::Generation
    }

    async fn health_check(&self) -> Result<HealthStatus, PracharError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PracharError> {
        Ok(())
    }
}

#[async_trait]
impl AudioCapability for MockAudioCapability {
    async fn generate_audio(
        &self,
        _text: &str,
        voice: VoiceGender,
    ) -> Result<Option<InlineAsset>, PracharError> {
        *self.last_voice.lock().await = Some(voice);
        match &self.outcome {
            Ok(asset) => Ok(asset.clone()),
            Err(message) => Err(PracharError::capability(message.clone())),
        }
    }
}
