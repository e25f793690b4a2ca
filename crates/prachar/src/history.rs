// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `history` subcommand: list and delete saved generations.

use clap::Subcommand;

use prachar_config::PracharConfig;
use prachar_core::payload::FeaturePayload;
use prachar_core::{PracharError, StoreAdapter};
use prachar_storage::SqliteStore;

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List saved generations, newest first.
    List,
    /// Delete one saved generation by id.
    Delete { id: String },
}

pub async fn run(config: &PracharConfig, action: HistoryAction) -> Result<(), PracharError> {
    let store = SqliteStore::new(config.storage.clone());
    store.initialize().await?;

    match action {
        HistoryAction::List => {
            let items = store.list_history(&config.app.user_id).await?;
            if items.is_empty() {
                println!("no saved content yet");
                return Ok(());
            }
            for item in items {
                println!(
                    "{}  {:<10}  {}  {}",
                    item.created_at,
                    item.feature.to_string(),
                    item.id,
                    preview(&item.output.data)
                );
            }
        }
        HistoryAction::Delete { id } => {
            store.delete_history(&id).await?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

/// A one-line preview of a stored payload.
fn preview(data: &Option<FeaturePayload>) -> String {
    let text = match data {
        Some(FeaturePayload::Instagram(p)) => {
            p.posts.first().map(|post| post.caption.clone())
        }
        Some(FeaturePayload::Whatsapp(p)) => p.messages.first().cloned(),
        Some(FeaturePayload::Reels(p)) => p.scripts.first().and_then(|s| s.hook.clone()),
        Some(FeaturePayload::Festival(p)) => Some(p.caption.clone()),
        Some(FeaturePayload::Calendar(p)) => {
            p.calendar.first().map(|entry| entry.topic.clone())
        }
        Some(FeaturePayload::Gmb(p)) => Some(p.business_description.clone()),
        Some(FeaturePayload::Poster(p)) => Some(p.poster_headline.clone()),
        None => None,
    };
    let mut text = text.unwrap_or_else(|| "(no preview)".into());
    if text.chars().count() > 60 {
        text = text.chars().take(57).collect::<String>() + "...";
    }
    text.replace('\n', " ")
}
