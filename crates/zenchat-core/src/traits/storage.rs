// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for durable key-value backends.

use async_trait::async_trait;

use crate::error::ZenError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for a durable string key-value store.
///
/// Values are opaque to the store; callers own their encoding.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), ZenError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), ZenError>;

    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, ZenError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), ZenError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), ZenError>;
}
