// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./prachar.toml` > `~/.config/prachar/prachar.toml`
//! > `/etc/prachar/prachar.toml` with environment variable overrides via the
//! `PRACHAR_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PracharConfig;

/// The config sections that environment variables can address.
const SECTIONS: &[&str] = &["app", "gemini", "limits", "storage"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/prachar/prachar.toml` (system-wide)
/// 3. `~/.config/prachar/prachar.toml` (user XDG config)
/// 4. `./prachar.toml` (local directory)
/// 5. `PRACHAR_*` environment variables
pub fn load_config() -> Result<PracharConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<PracharConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PracharConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PracharConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PracharConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PracharConfig::default()))
        .merge(Toml::file("/etc/prachar/prachar.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("prachar/prachar.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("prachar.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider.
///
/// Uses an explicit `map()` rather than `Env::split("_")` so that keys which
/// themselves contain underscores (e.g. `PRACHAR_GEMINI_API_KEY` ->
/// `gemini.api_key`) map unambiguously: only the leading section name is
/// split off; the rest of the variable is the key.
fn env_provider() -> Env {
    Env::prefixed("PRACHAR_").map(|key| {
        let lowered = key.as_str().to_ascii_lowercase();
        for section in SECTIONS {
            if let Some(rest) = lowered.strip_prefix(&format!("{section}_")) {
                return format!("{section}.{rest}").into();
            }
        }
        lowered.into()
    })
}
