// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini API.
//!
//! Provides [`GeminiClient`], which implements all four capability traits:
//! text generation via `generateContent`, image generation via the image
//! model, long-running video generation via `predictLongRunning` with a
//! bounded polling loop, and TTS audio via the speech model.
//!
//! The client performs no internal retry: the generation orchestrator owns
//! the attempt budget, and asset wrappers are single-shot by contract.

use std::time::Duration;

use prachar_config::model::GeminiConfig;
use prachar_core::traits::adapter::{AdapterKind, HealthStatus};
use prachar_core::types::{
    AspectRatio, InlineAsset, TextRequest, TextResponse, VideoHandle, VoiceGender,
};
use prachar_core::{
    Adapter, AudioCapability, ImageCapability, PracharError, TextCapability, VideoCapability,
};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::types::{
    marketing_safety_settings, ApiErrorResponse, Content, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, ImageConfig, Operation, PrebuiltVoiceConfig,
    PredictLongRunningRequest, SpeechConfig, VideoInstance, VoiceConfig,
};

/// Base URL for the Gemini API.
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for Gemini API communication.
///
/// Manages authentication headers, connection pooling, and the long-running
/// video operation lifecycle.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    ///
    /// The API key is taken from the config, falling back to the
    /// `GEMINI_API_KEY` environment variable.
    pub fn new(config: GeminiConfig) -> Result<Self, PracharError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or_else(|| {
                PracharError::Config(
                    "no Gemini API key: set gemini.api_key or GEMINI_API_KEY".into(),
                )
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&api_key).map_err(|e| {
                PracharError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| PracharError::Capability {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            config,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, PracharError> {
        let url = format!("{}/{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| PracharError::Capability {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        Self::read_response(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PracharError> {
        let url = format!("{}/{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PracharError::Capability {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        Self::read_response(response).await
    }

    async fn read_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PracharError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PracharError::Capability {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;
        debug!(status = %status, "Gemini response received");

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "Gemini API error ({}): {}",
                    api_err.error.status.as_deref().unwrap_or("UNKNOWN"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(PracharError::capability(message));
        }

        serde_json::from_str(&body).map_err(|e| PracharError::Capability {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// The prebuilt TTS voice for a requested gender.
    fn voice_name(voice: VoiceGender) -> &'static str {
        match voice {
            VoiceGender::Male => "Puck",
            VoiceGender::Female | VoiceGender::Duo => "Kore",
        }
    }
}

#[async_trait]
impl Adapter for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::Generation
    }

    async fn health_check(&self) -> Result<HealthStatus, PracharError> {
        // Stateless HTTP client; connectivity problems surface per-call.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PracharError> {
        Ok(())
    }
}

#[async_trait]
impl TextCapability for GeminiClient {
    async fn generate_text(&self, request: TextRequest) -> Result<TextResponse, PracharError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![crate::types::Part {
                    text: Some(request.body),
                    inline_data: None,
                }],
            }],
            system_instruction: Some(Content::text(request.system)),
            generation_config: Some(GenerationConfig {
                temperature: Some(self.config.temperature),
                response_mime_type: Some("application/json".into()),
                ..Default::default()
            }),
            safety_settings: Some(marketing_safety_settings()),
        };

        let path = format!("models/{}:generateContent", self.config.text_model);
        let response: GenerateContentResponse = self.post_json(&path, &body).await?;

        let text = response
            .first_text()
            .ok_or_else(|| PracharError::capability("no response text from model"))?;
        Ok(TextResponse {
            text,
            model: response
                .model_version
                .unwrap_or_else(|| self.config.text_model.clone()),
        })
    }
}

#[async_trait]
impl ImageCapability for GeminiClient {
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<Option<InlineAsset>, PracharError> {
        let body = GenerateContentRequest {
            contents: vec![Content::text(prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: aspect_ratio.to_string(),
                }),
                ..Default::default()
            }),
            safety_settings: None,
        };

        let path = format!("models/{}:generateContent", self.config.image_model);
        let response: GenerateContentResponse = self.post_json(&path, &body).await?;

        Ok(response.first_inline_data().map(|inline| InlineAsset {
            mime_type: inline.mime_type.clone(),
            data: inline.data.clone(),
        }))
    }
}

#[async_trait]
impl VideoCapability for GeminiClient {
    async fn generate_video(&self, prompt: &str) -> Result<Option<VideoHandle>, PracharError> {
        let body = PredictLongRunningRequest {
            instances: vec![VideoInstance {
                prompt: prompt.to_string(),
            }],
        };
        let path = format!("models/{}:predictLongRunning", self.config.video_model);
        let submitted: Operation = self.post_json(&path, &body).await?;
        debug!(operation = %submitted.name, "video operation submitted");

        // Bounded polling: exponential backoff up to a cap, fixed number of
        // polls, then give up. A hung operation must not hang the caller.
        let mut delay = Duration::from_secs(self.config.video_poll_initial_secs);
        let cap = Duration::from_secs(self.config.video_poll_cap_secs);

        for poll in 1..=self.config.video_poll_max_attempts {
            tokio::time::sleep(delay).await;
            let operation: Operation = self.get_json(&submitted.name).await?;

            if operation.done {
                if let Some(error) = operation.error {
                    return Err(PracharError::capability(format!(
                        "video operation failed: {}",
                        error.message.as_deref().unwrap_or("unknown error")
                    )));
                }
                let uri = operation
                    .response
                    .and_then(|r| r.generate_video_response)
                    .and_then(|v| v.generated_samples.into_iter().next())
                    .and_then(|s| s.video)
                    .map(|v| v.uri);
                return Ok(uri.map(|uri| VideoHandle { uri }));
            }

            debug!(operation = %submitted.name, poll, "video operation still running");
            delay = (delay * 2).min(cap);
        }

        warn!(operation = %submitted.name, "video operation exceeded poll budget");
        Err(PracharError::capability(
            "video operation did not complete within the poll budget",
        ))
    }
}

#[async_trait]
impl AudioCapability for GeminiClient {
    async fn generate_audio(
        &self,
        text: &str,
        voice: VoiceGender,
    ) -> Result<Option<InlineAsset>, PracharError> {
        let body = GenerateContentRequest {
            contents: vec![Content::text(text)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".into()]),
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: Self::voice_name(voice).into(),
                        },
                    },
                }),
                ..Default::default()
            }),
            safety_settings: None,
        };

        let path = format!("models/{}:generateContent", self.config.tts_model);
        let response: GenerateContentResponse = self.post_json(&path, &body).await?;

        Ok(response.first_inline_data().map(|inline| InlineAsset {
            mime_type: inline.mime_type.clone(),
            data: inline.data.clone(),
        }))
    }
}
