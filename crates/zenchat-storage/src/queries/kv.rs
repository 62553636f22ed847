// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value operations on the `kv_store` table.

use rusqlite::{params, OptionalExtension};
use zenchat_core::ZenError;

use crate::database::{map_tr_err, Database};

/// Read the value stored under `key`.
pub async fn get(db: &Database, key: &str) -> Result<Option<String>, ZenError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert or replace the value under `key`.
pub async fn set(db: &Database, key: &str, value: &str) -> Result<(), ZenError> {
    let key = key.to_string();
    let value = value.to_string();
    let now = chrono::Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Delete `key`. Returns whether a row was removed.
pub async fn remove(db: &Database, key: &str) -> Result<bool, ZenError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            let removed = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
            Ok(removed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Last write timestamp for `key`, RFC 3339.
pub async fn updated_at(db: &Database, key: &str) -> Result<Option<String>, ZenError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT updated_at FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}
