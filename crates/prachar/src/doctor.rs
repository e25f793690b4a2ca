// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `doctor` subcommand: verify configuration, store, and capability
//! wiring without making a billable generation call.

use prachar_config::PracharConfig;
use prachar_core::traits::adapter::HealthStatus;
use prachar_core::{Adapter, PracharError, StoreAdapter};
use prachar_gemini::GeminiClient;
use prachar_storage::SqliteStore;

pub async fn run(config: &PracharConfig) -> Result<(), PracharError> {
    println!("prachar doctor");
    println!("  config: ok (validated at startup)");
    println!("  user: {}", config.app.user_id);
    println!("  daily free quota: {}", config.limits.free_daily_quota);

    match store_status(config).await {
        Ok(status) => println!("  store: {status}"),
        Err(e) => println!("  store: unavailable ({e})"),
    }

    match GeminiClient::new(config.gemini.clone()) {
        Ok(client) => println!(
            "  gemini: configured (adapter `{}`, text model {})",
            client.name(),
            config.gemini.text_model
        ),
        Err(e) => println!("  gemini: not configured ({e})"),
    }

    Ok(())
}

async fn store_status(config: &PracharConfig) -> Result<String, PracharError> {
    let store = SqliteStore::new(config.storage.clone());
    store.initialize().await?;
    let status = store.health_check().await?;
    Ok(match status {
        HealthStatus::Healthy => format!("healthy ({})", config.storage.database_path),
        HealthStatus::Degraded(reason) => format!("degraded: {reason}"),
        HealthStatus::Unhealthy(reason) => format!("unhealthy: {reason}"),
    })
}
