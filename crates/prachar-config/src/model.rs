// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Prachar content engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Prachar configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PracharConfig {
    /// Application identity and logging settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Gemini API settings for all four generative capabilities.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Plan gating and retry policy settings.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Store backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name of the application.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Identifier used to key profiles, history, and usage counters.
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
            user_id: default_user_id(),
        }
    }
}

fn default_app_name() -> String {
    "prachar".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_user_id() -> String {
    "local".to_string()
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` requires the environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model for text generation.
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model for image generation.
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Model for long-running video generation.
    #[serde(default = "default_video_model")]
    pub video_model: String,

    /// Model for text-to-speech audio.
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Sampling temperature for text generation. Marketing copy wants
    /// creativity, so the default runs hot.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// HTTP client timeout per request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// First video-operation poll delay, in seconds. Doubles per poll.
    #[serde(default = "default_video_poll_initial_secs")]
    pub video_poll_initial_secs: u64,

    /// Upper bound on a single poll delay, in seconds.
    #[serde(default = "default_video_poll_cap_secs")]
    pub video_poll_cap_secs: u64,

    /// Maximum number of polls before the operation is abandoned.
    #[serde(default = "default_video_poll_max_attempts")]
    pub video_poll_max_attempts: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: default_text_model(),
            image_model: default_image_model(),
            video_model: default_video_model(),
            tts_model: default_tts_model(),
            temperature: default_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
            video_poll_initial_secs: default_video_poll_initial_secs(),
            video_poll_cap_secs: default_video_poll_cap_secs(),
            video_poll_max_attempts: default_video_poll_max_attempts(),
        }
    }
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_video_model() -> String {
    "veo-3.0-generate-001".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_temperature() -> f64 {
    0.75
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_video_poll_initial_secs() -> u64 {
    5
}

fn default_video_poll_cap_secs() -> u64 {
    30
}

fn default_video_poll_max_attempts() -> u32 {
    10
}

/// Plan gating and retry policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Daily successful-generation quota for free-plan sessions.
    #[serde(default = "default_free_daily_quota")]
    pub free_daily_quota: u32,

    /// Total text-generation attempts per invocation (first try + retries).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed backoff between attempts, in seconds.
    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: u64,

    /// Deadline per capability call, in seconds.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            free_daily_quota: default_free_daily_quota(),
            max_attempts: default_max_attempts(),
            retry_backoff_secs: default_retry_backoff_secs(),
            deadline_secs: default_deadline_secs(),
        }
    }
}

fn default_free_daily_quota() -> u32 {
    5
}

fn default_max_attempts() -> u32 {
    2
}

fn default_retry_backoff_secs() -> u64 {
    1
}

fn default_deadline_secs() -> u64 {
    90
}

/// Store backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("prachar").join("prachar.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("prachar.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = PracharConfig::default();
        assert_eq!(config.app.name, "prachar");
        assert_eq!(config.limits.free_daily_quota, 5);
        assert_eq!(config.limits.max_attempts, 2);
        assert_eq!(config.limits.retry_backoff_secs, 1);
        assert!((config.gemini.temperature - 0.75).abs() < f64::EPSILON);
        assert!(config.gemini.api_key.is_none());
        assert!(config.storage.wal_mode);
    }

    #[test]
    fn config_serializes_and_reloads() {
        let config = PracharConfig::default();
        let toml = toml::to_string(&config).unwrap();
        let back: PracharConfig = toml::from_str(&toml).unwrap();
        assert_eq!(back.gemini.text_model, config.gemini.text_model);
        assert_eq!(back.limits.deadline_secs, config.limits.deadline_secs);
    }
}
