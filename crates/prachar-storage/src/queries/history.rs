// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation history operations.
//!
//! History rows store the form input and the response envelope as JSON text
//! columns; rows are immutable after insert and ordered newest-first on read.

use std::str::FromStr;

use prachar_core::types::HistoryItem;
use prachar_core::{FeatureType, PracharError};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Append an immutable history record; returns the record as stored.
pub async fn append_history(
    db: &Database,
    user_id: &str,
    item: &HistoryItem,
) -> Result<HistoryItem, PracharError> {
    let user_id = user_id.to_string();
    let stored = item.clone();
    let input_data = serde_json::to_string(&item.input).map_err(store_err)?;
    let output_data = serde_json::to_string(&item.output).map_err(store_err)?;
    let (id, created_at, feature) =
        (item.id.clone(), item.created_at.clone(), item.feature.to_string());

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO history (id, user_id, feature, input_data, output_data, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, user_id, feature, input_data, output_data, created_at],
            )?;
            Ok::<_, rusqlite::Error>(())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(stored)
}

/// List a user's history, newest first.
pub async fn list_history(
    db: &Database,
    user_id: &str,
) -> Result<Vec<HistoryItem>, PracharError> {
    let user_id = user_id.to_string();
    let rows: Vec<(String, String, String, String, String)> = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, feature, input_data, output_data, created_at
                 FROM history WHERE user_id = ?1 ORDER BY created_at DESC",
            )?;
            let rows = stmt.query_map(params![user_id], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            })?;
            let mut items = Vec::new();
            for row in rows {
                items.push(row?);
            }
            Ok::<_, rusqlite::Error>(items)
        })
        .await
        .map_err(map_tr_err)?;

    rows.into_iter()
        .map(|(id, feature, input_data, output_data, created_at)| {
            Ok(HistoryItem {
                id,
                created_at,
                feature: FeatureType::from_str(&feature).map_err(store_err)?,
                input: serde_json::from_str(&input_data).map_err(store_err)?,
                output: serde_json::from_str(&output_data).map_err(store_err)?,
            })
        })
        .collect()
}

/// Delete a history record by id.
pub async fn delete_history(db: &Database, id: &str) -> Result<(), PracharError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM history WHERE id = ?1", params![id])?;
            Ok::<_, rusqlite::Error>(())
        })
        .await
        .map_err(map_tr_err)
}

fn store_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> PracharError {
    PracharError::Store {
        source: Box::new(e),
    }
}
