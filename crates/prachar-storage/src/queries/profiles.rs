// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile CRUD operations.

use std::str::FromStr;

use prachar_core::types::{Language, PlanTier, ProfilePatch, UserProfile};
use prachar_core::PracharError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Get a profile by user id.
pub async fn get_profile(
    db: &Database,
    user_id: &str,
) -> Result<Option<UserProfile>, PracharError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT name, email, phone, business_name, business_type, city,
                        default_language, plan
                 FROM profiles WHERE user_id = ?1",
            )?;
            let result = stmt.query_row(params![user_id], |row| {
                let language: String = row.get(6)?;
                let plan: String = row.get(7)?;
                Ok(UserProfile {
                    name: row.get(0)?,
                    email: row.get(1)?,
                    phone: row.get(2)?,
                    business_name: row.get(3)?,
                    business_type: row.get(4)?,
                    city: row.get(5)?,
                    default_language: Language::from_str(&language)
                        .unwrap_or(Language::Hinglish),
                    plan: PlanTier::from_str(&plan).unwrap_or(PlanTier::Free),
                })
            });
            match result {
                Ok(profile) => Ok(Some(profile)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Create or partially update a profile. `None` patch fields keep their
/// stored value (or the column default for a fresh row).
pub async fn upsert_profile(
    db: &Database,
    user_id: &str,
    patch: ProfilePatch,
) -> Result<(), PracharError> {
    let user_id = user_id.to_string();
    let updated_at = now_iso();
    db.connection()
        .call(move |conn| {
            // read-merge-write; atomic because all access rides the single
            // background connection thread
            let existing = {
                let mut stmt = conn.prepare(
                    "SELECT name, email, phone, business_name, business_type, city,
                            default_language, plan
                     FROM profiles WHERE user_id = ?1",
                )?;
                let result = stmt.query_row(params![user_id], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, String>(6)?,
                        row.get::<_, String>(7)?,
                    ))
                });
                match result {
                    Ok(row) => Some(row),
                    Err(rusqlite::Error::QueryReturnedNoRows) => None,
                    Err(e) => return Err(e),
                }
            };

            let (name, email, phone, business_name, business_type, city, language, plan) =
                existing.unwrap_or_else(|| {
                    (
                        String::new(),
                        String::new(),
                        String::new(),
                        String::new(),
                        String::new(),
                        String::new(),
                        Language::Hinglish.to_string(),
                        PlanTier::Free.to_string(),
                    )
                });

            conn.execute(
                "INSERT OR REPLACE INTO profiles
                 (user_id, name, email, phone, business_name, business_type, city,
                  default_language, plan, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    user_id,
                    patch.name.unwrap_or(name),
                    patch.email.unwrap_or(email),
                    patch.phone.unwrap_or(phone),
                    patch.business_name.unwrap_or(business_name),
                    patch.business_type.unwrap_or(business_type),
                    patch.city.unwrap_or(city),
                    patch
                        .default_language
                        .map(|l| l.to_string())
                        .unwrap_or(language),
                    patch.plan.map(|p| p.to_string()).unwrap_or(plan),
                    updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Flip a user's plan to paid, creating the profile row if needed.
pub async fn upgrade_plan(db: &Database, user_id: &str) -> Result<(), PracharError> {
    let user_id = user_id.to_string();
    let updated_at = now_iso();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO profiles (user_id, plan, updated_at) VALUES (?1, 'paid', ?2)
                 ON CONFLICT(user_id) DO UPDATE SET plan = 'paid', updated_at = ?2",
                params![user_id, updated_at],
            )?;
            Ok::<_, rusqlite::Error>(())
        })
        .await
        .map_err(map_tr_err)
}

fn now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
