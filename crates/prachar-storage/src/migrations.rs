// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL migration files are compiled into the binary at build time via
//! `embed_migrations!`. Migrations run automatically on database open.

use prachar_core::PracharError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations on the connection's background thread.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history`
/// table, so running on every open is idempotent.
pub async fn run_migrations(conn: &tokio_rusqlite::Connection) -> Result<(), PracharError> {
    conn.call(|conn| {
        embedded::migrations::runner().run(conn)?;
        Ok::<_, refinery::Error>(())
    })
    .await
    .map_err(|e| PracharError::Store {
        source: Box::new(e),
    })
}
