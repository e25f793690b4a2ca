// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Prachar content engine.

use thiserror::Error;

/// The primary error type used across all Prachar adapter traits and core operations.
#[derive(Debug, Error)]
pub enum PracharError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Store backend errors (database connection, query failure, serialization).
    #[error("store error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Generative capability errors (API failure, malformed reply, blocked content).
    #[error("capability error: {message}")]
    Capability {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A capability call exceeded its deadline.
    #[error("capability call timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PracharError {
    /// Shorthand for a capability error with no underlying source.
    pub fn capability(message: impl Into<String>) -> Self {
        Self::Capability {
            message: message.into(),
            source: None,
        }
    }
}
