// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL files under `migrations/` are compiled into the binary and applied on open.

use zenchat_core::ZenError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), ZenError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(|e| ZenError::Storage {
            source: Box::new(e),
        })?;
    tracing::debug!(applied = report.applied_migrations().len(), "migrations applied");
    Ok(())
}
