// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot subcommands: `history`, `reset` and `config`.

use std::sync::Arc;

use colored::Colorize;
use zenchat_agent::ConversationStore;
use zenchat_config::ZenConfig;
use zenchat_core::{HealthStatus, PluginAdapter, StorageAdapter, ZenError};
use zenchat_storage::SqliteStorage;

use crate::render;

/// Opens and initializes the configured SQLite store.
///
/// Fails if the store does not report healthy once initialized.
pub async fn open_storage(
    config: &ZenConfig,
) -> Result<Arc<dyn StorageAdapter + Send + Sync>, ZenError> {
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    ensure_healthy(storage.health_check().await?)?;
    Ok(Arc::new(storage))
}

fn ensure_healthy(status: HealthStatus) -> Result<(), ZenError> {
    match status {
        HealthStatus::Healthy => Ok(()),
        HealthStatus::Unhealthy(reason) => Err(ZenError::Storage {
            source: format!("storage unhealthy: {reason}").into(),
        }),
    }
}

/// Runs `zenchat history`: prints the stored conversation.
pub async fn run_history(config: ZenConfig) -> Result<(), ZenError> {
    let storage = open_storage(&config).await?;
    let store = ConversationStore::new(storage.clone());
    let theme = store.load_theme().await.unwrap_or(config.ui.default_theme);

    match store.load_log().await {
        Some(log) => {
            for message in log.iter() {
                println!("{}", render::render_message(message, &config.assistant.name, theme));
            }
        }
        None => println!("{}", "no stored conversation".dimmed()),
    }

    storage.close().await
}

/// Runs `zenchat reset`: removes the stored conversation.
pub async fn run_reset(config: ZenConfig) -> Result<(), ZenError> {
    let storage = open_storage(&config).await?;
    ConversationStore::new(storage.clone()).clear_log().await?;
    println!("{}", "conversation cleared".green());
    storage.close().await
}

/// Runs `zenchat config`: prints the effective configuration.
pub fn run_config(config: &ZenConfig) -> Result<(), ZenError> {
    let rendered =
        zenchat_config::to_redacted_toml(config).map_err(|e| ZenError::Config(e.to_string()))?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_storage_returns_a_healthy_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ZenConfig::default();
        config.storage.database_path = dir.path().join("zenchat.db").to_string_lossy().into_owned();

        let storage = open_storage(&config).await.unwrap();
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);
        storage.close().await.unwrap();
    }

    #[test]
    fn unhealthy_status_is_a_storage_error() {
        let err = ensure_healthy(HealthStatus::Unhealthy("disk full".into())).unwrap_err();
        assert!(matches!(err, ZenError::Storage { .. }));
        assert!(err.to_string().contains("disk full"), "got: {err}");
        assert!(ensure_healthy(HealthStatus::Healthy).is_ok());
    }
}
