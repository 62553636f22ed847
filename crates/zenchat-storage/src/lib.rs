// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for zenchat.
//!
//! Provides a WAL-mode SQLite key-value store with embedded migrations and a
//! single-writer concurrency model via `tokio-rusqlite`. The conversation
//! log and the theme preference live here as opaque string values.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
