// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory storage adapter.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use zenchat_core::{AdapterType, HealthStatus, PluginAdapter, StorageAdapter, ZenError};

/// A `StorageAdapter` backed by a `HashMap`.
///
/// `seed` and `raw` bypass the adapter interface so tests can plant corrupt
/// values and inspect what was written. [`set_failing`](Self::set_failing)
/// makes every adapter call return a storage error.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value directly.
    pub async fn seed(&self, key: &str, value: &str) {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }

    /// Read a raw value directly.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().await.get(key).cloned()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), ZenError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ZenError::Storage {
                source: "memory storage set to fail".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, ZenError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ZenError> {
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for MemoryStorage {
    async fn initialize(&self) -> Result<(), ZenError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), ZenError> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, ZenError> {
        self.check()?;
        Ok(self.raw(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ZenError> {
        self.check()?;
        self.seed(key, value).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ZenError> {
        self.check()?;
        self.values.lock().await.remove(key);
        Ok(())
    }
}
