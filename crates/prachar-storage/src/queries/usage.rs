// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Advisory per-day usage counters.
//!
//! One row per `(user, day)`; the increment is atomic on the single
//! background connection thread.

use prachar_core::PracharError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Read the success count for a user and day. Missing rows count as zero.
pub async fn usage_count(db: &Database, user_id: &str, day: &str) -> Result<u32, PracharError> {
    let user_id = user_id.to_string();
    let day = day.to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT count FROM usage_counters WHERE user_id = ?1 AND day = ?2",
                params![user_id, day],
                |row| row.get::<_, u32>(0),
            );
            match result {
                Ok(count) => Ok(count),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Increment the success count for a user and day, returning the new count.
pub async fn increment_usage(
    db: &Database,
    user_id: &str,
    day: &str,
) -> Result<u32, PracharError> {
    let user_id = user_id.to_string();
    let day = day.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "INSERT INTO usage_counters (user_id, day, count) VALUES (?1, ?2, 1)
                 ON CONFLICT(user_id, day) DO UPDATE SET count = count + 1
                 RETURNING count",
                params![user_id, day],
                |row| row.get::<_, u32>(0),
            )
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_counter_reads_zero() {
        let db = Database::open_in_memory().await.unwrap();
        assert_eq!(usage_count(&db, "u1", "2026-08-06").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn increment_is_cumulative_per_day() {
        let db = Database::open_in_memory().await.unwrap();
        assert_eq!(increment_usage(&db, "u1", "2026-08-06").await.unwrap(), 1);
        assert_eq!(increment_usage(&db, "u1", "2026-08-06").await.unwrap(), 2);
        assert_eq!(increment_usage(&db, "u1", "2026-08-07").await.unwrap(), 1);
        assert_eq!(usage_count(&db, "u1", "2026-08-06").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn counters_are_per_user() {
        let db = Database::open_in_memory().await.unwrap();
        increment_usage(&db, "u1", "2026-08-06").await.unwrap();
        assert_eq!(usage_count(&db, "u2", "2026-08-06").await.unwrap(), 0);
    }
}
