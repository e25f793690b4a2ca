// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `profile` subcommand: show and update the business profile.

use clap::{Args, Subcommand};

use prachar_config::PracharConfig;
use prachar_core::types::{Language, PlanTier, ProfilePatch};
use prachar_core::{PracharError, StoreAdapter};
use prachar_storage::SqliteStore;

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    /// Print the saved profile.
    Show,
    /// Create or update profile fields.
    Set(SetArgs),
    /// Switch the profile to the paid plan.
    Upgrade,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub business_name: Option<String>,
    #[arg(long)]
    pub business_type: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    /// Default output language: Hindi, English, or Hinglish.
    #[arg(long)]
    pub language: Option<Language>,
}

pub async fn run(config: &PracharConfig, action: ProfileAction) -> Result<(), PracharError> {
    let store = SqliteStore::new(config.storage.clone());
    store.initialize().await?;
    let user_id = &config.app.user_id;

    match action {
        ProfileAction::Show => match store.get_profile(user_id).await? {
            Some(profile) => println!(
                "{}",
                serde_json::to_string_pretty(&profile)
                    .map_err(|e| PracharError::Internal(e.to_string()))?
            ),
            None => println!("no profile saved; run `prachar profile set ...`"),
        },
        ProfileAction::Set(args) => {
            let patch = ProfilePatch {
                name: args.name,
                email: args.email,
                phone: args.phone,
                business_name: args.business_name,
                business_type: args.business_type,
                city: args.city,
                default_language: args.language,
                plan: None,
            };
            store.upsert_profile(user_id, patch).await?;
            println!("profile saved");
        }
        ProfileAction::Upgrade => {
            store.upgrade_plan(user_id).await?;
            let plan = store
                .get_profile(user_id)
                .await?
                .map(|p| p.plan)
                .unwrap_or(PlanTier::Paid);
            println!("plan: {plan}");
        }
    }
    Ok(())
}
