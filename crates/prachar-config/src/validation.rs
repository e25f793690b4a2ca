// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as value ranges and non-empty paths. All failures are
//! collected rather than failing fast.

use crate::diagnostic::ConfigError;
use crate::model::PracharConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &PracharConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.app.log_level
            ),
        });
    }

    if config.app.user_id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "app.user_id must not be empty".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.gemini.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "gemini.temperature must be between 0.0 and 2.0, got {}",
                config.gemini.temperature
            ),
        });
    }

    if config.gemini.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.gemini.video_poll_max_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.video_poll_max_attempts must be at least 1".to_string(),
        });
    }

    if config.gemini.video_poll_cap_secs < config.gemini.video_poll_initial_secs {
        errors.push(ConfigError::Validation {
            message: format!(
                "gemini.video_poll_cap_secs ({}) must be >= gemini.video_poll_initial_secs ({})",
                config.gemini.video_poll_cap_secs, config.gemini.video_poll_initial_secs
            ),
        });
    }

    if config.limits.free_daily_quota == 0 {
        errors.push(ConfigError::Validation {
            message: "limits.free_daily_quota must be at least 1".to_string(),
        });
    }

    if config.limits.max_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "limits.max_attempts must be at least 1".to_string(),
        });
    }

    if config.limits.deadline_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "limits.deadline_secs must be at least 1".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
