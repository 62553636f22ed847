// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence of the conversation log and user preferences over a
//! [`StorageAdapter`].
//!
//! Reads never fail: a missing, unreadable or corrupt value is reported as
//! absent so callers can fall back to defaults. Writes return errors and leave
//! it to the caller whether to surface them.

use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, warn};
use zenchat_core::{ConversationLog, StorageAdapter, Theme, ZenError};

/// Key holding the JSON-serialized conversation log.
pub const LOG_KEY: &str = "chat-messages";

/// Key holding the theme preference.
pub const THEME_KEY: &str = "chatbot-theme";

/// Typed view of the durable key-value store.
#[derive(Clone)]
pub struct ConversationStore {
    storage: Arc<dyn StorageAdapter + Send + Sync>,
}

impl ConversationStore {
    pub fn new(storage: Arc<dyn StorageAdapter + Send + Sync>) -> Self {
        Self { storage }
    }

    /// The stored log, or `None` when it is missing, empty or unparseable.
    pub async fn load_log(&self) -> Option<ConversationLog> {
        let raw = match self.storage.get(LOG_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "failed to read stored conversation, starting fresh");
                return None;
            }
        };

        match serde_json::from_str::<ConversationLog>(&raw) {
            Ok(log) if log.is_empty() => None,
            Ok(log) => {
                debug!(messages = log.len(), "restored conversation");
                Some(log)
            }
            Err(e) => {
                warn!(error = %e, "stored conversation is corrupt, starting fresh");
                None
            }
        }
    }

    pub async fn save_log(&self, log: &ConversationLog) -> Result<(), ZenError> {
        let json = serde_json::to_string(log).map_err(|e| ZenError::Storage {
            source: Box::new(e),
        })?;
        self.storage.set(LOG_KEY, &json).await
    }

    pub async fn clear_log(&self) -> Result<(), ZenError> {
        self.storage.remove(LOG_KEY).await
    }

    /// A stored preference, or `None` when absent or unreadable.
    pub async fn load_preference(&self, key: &str) -> Option<String> {
        match self.storage.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "failed to read preference");
                None
            }
        }
    }

    pub async fn save_preference(&self, key: &str, value: &str) -> Result<(), ZenError> {
        self.storage.set(key, value).await
    }

    /// The stored theme. Values other than `light` and `dark` are ignored.
    pub async fn load_theme(&self) -> Option<Theme> {
        let raw = self.load_preference(THEME_KEY).await?;
        match Theme::from_str(&raw) {
            Ok(theme) => Some(theme),
            Err(_) => {
                warn!(value = %raw, "ignoring unknown stored theme");
                None
            }
        }
    }

    pub async fn save_theme(&self, theme: Theme) -> Result<(), ZenError> {
        self.save_preference(THEME_KEY, &theme.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zenchat_core::{Message, UserMessage};
    use zenchat_test_utils::MemoryStorage;

    fn store_over(storage: &Arc<MemoryStorage>) -> ConversationStore {
        ConversationStore::new(storage.clone())
    }

    #[tokio::test]
    async fn missing_log_is_absent() {
        let storage = Arc::new(MemoryStorage::new());
        assert!(store_over(&storage).load_log().await.is_none());
    }

    #[tokio::test]
    async fn log_round_trips_through_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_over(&storage);

        let mut log = ConversationLog::seeded("Hi!");
        log.push(Message::User(UserMessage {
            content: "hello".into(),
            attachment: None,
        }));
        store.save_log(&log).await.unwrap();

        assert_eq!(store.load_log().await, Some(log));
        let raw = storage.raw(LOG_KEY).await.unwrap();
        assert!(raw.starts_with('['), "stored as a JSON array: {raw}");
    }

    #[tokio::test]
    async fn corrupt_log_is_absent() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(LOG_KEY, "{not json").await;
        assert!(store_over(&storage).load_log().await.is_none());

        storage.seed(LOG_KEY, r#"[{"role":"narrator","content":"x"}]"#).await;
        assert!(store_over(&storage).load_log().await.is_none());
    }

    #[tokio::test]
    async fn empty_stored_log_is_absent() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(LOG_KEY, "[]").await;
        assert!(store_over(&storage).load_log().await.is_none());
    }

    #[tokio::test]
    async fn clear_log_removes_the_key() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_over(&storage);
        store.save_log(&ConversationLog::seeded("Hi!")).await.unwrap();
        store.clear_log().await.unwrap();
        assert!(storage.raw(LOG_KEY).await.is_none());
    }

    #[tokio::test]
    async fn theme_preference_round_trips() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_over(&storage);

        assert_eq!(store.load_theme().await, None);
        store.save_theme(Theme::Dark).await.unwrap();
        assert_eq!(store.load_theme().await, Some(Theme::Dark));
        assert_eq!(storage.raw(THEME_KEY).await.as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn unknown_theme_value_is_ignored() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(THEME_KEY, "sepia").await;
        assert_eq!(store_over(&storage).load_theme().await, None);
    }

    #[tokio::test]
    async fn generic_preferences() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_over(&storage);
        store.save_preference("font-size", "large").await.unwrap();
        assert_eq!(store.load_preference("font-size").await.as_deref(), Some("large"));
        assert_eq!(store.load_preference("missing").await, None);
    }

    #[tokio::test]
    async fn read_failures_are_absent() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_failing(true);
        let store = store_over(&storage);
        assert!(store.load_log().await.is_none());
        assert!(store.load_theme().await.is_none());
        assert!(store.save_theme(Theme::Dark).await.is_err());
    }
}
