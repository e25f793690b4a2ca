// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use prachar_config::model::StorageConfig;
use prachar_core::PracharError;
use tracing::debug;

/// Handle to the SQLite database behind the store.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at the configured path, apply
    /// PRAGMAs, and run pending migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, PracharError> {
        if let Some(parent) = Path::new(&config.database_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| PracharError::Store {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(&config.database_path)
            .await
            .map_err(|e| PracharError::Store {
                source: Box::new(e),
            })?;

        let wal_mode = config.wal_mode;
        conn.call(move |conn| {
            if wal_mode {
                conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
            }
            conn.execute_batch("PRAGMA foreign_keys=ON;")?;
            Ok::<_, rusqlite::Error>(())
        })
        .await
        .map_err(map_tr_err)?;

        crate::migrations::run_migrations(&conn).await?;
        debug!(path = %config.database_path, wal = wal_mode, "database opened");

        Ok(Self { conn })
    }

    /// Open an in-memory database with migrations applied (tests, doctor).
    pub async fn open_in_memory() -> Result<Self, PracharError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| PracharError::Store {
                source: Box::new(e),
            })?;
        crate::migrations::run_migrations(&conn).await?;
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }
}

/// Convert a tokio-rusqlite error into `PracharError::Store`.
pub fn map_tr_err<E>(e: tokio_rusqlite::Error<E>) -> PracharError
where
    E: std::error::Error + Send + Sync + 'static,
{
    PracharError::Store {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_file_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            database_path: dir
                .path()
                .join("nested/prachar.db")
                .to_string_lossy()
                .into_owned(),
            wal_mode: true,
        };
        let db = Database::open(&config).await.unwrap();
        let tables: Vec<String> = db
            .connection()
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name",
                )?;
                let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
                let mut names = Vec::new();
                for row in rows {
                    names.push(row?);
                }
                Ok::<_, rusqlite::Error>(names)
            })
            .await
            .unwrap();
        for table in ["profiles", "history", "usage_counters"] {
            assert!(tables.iter().any(|t| t == table), "missing table {table}");
        }
    }

    #[tokio::test]
    async fn reopening_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            database_path: dir.path().join("prachar.db").to_string_lossy().into_owned(),
            wal_mode: false,
        };
        drop(Database::open(&config).await.unwrap());
        // second open must not fail on already-applied migrations
        Database::open(&config).await.unwrap();
    }
}
