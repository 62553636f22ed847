// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a conversation controller over a temp SQLite
//! database and a mock provider.

use std::sync::Arc;

use zenchat_agent::{ConversationController, ConversationStore, Persona};
use zenchat_config::model::{StorageConfig, ZenConfig};
use zenchat_core::{ProviderAdapter, StorageAdapter, ZenError};
use zenchat_storage::SqliteStorage;

use crate::mock_provider::{MockProvider, MockReply};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    replies: Vec<MockReply>,
    gated: bool,
    system_prompt: Option<String>,
    greeting: Option<String>,
    stored_log: Option<String>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
            gated: false,
            system_prompt: None,
            greeting: None,
            stored_log: None,
        }
    }

    /// Set scripted provider replies.
    pub fn with_replies(mut self, replies: Vec<MockReply>) -> Self {
        self.replies = replies;
        self
    }

    /// Hold provider requests until `mock_provider.release()` is called.
    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    /// Set a custom system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    /// Write a raw value under the log key before the controller starts.
    pub fn with_stored_log(mut self, raw: impl Into<String>) -> Self {
        self.stored_log = Some(raw.into());
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, ZenError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| ZenError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = ZenConfig::default();
        config.storage = StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        };
        config.assistant.system_prompt = self.system_prompt;
        if let Some(greeting) = self.greeting {
            config.assistant.greeting = greeting;
        }

        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        let storage: Arc<dyn StorageAdapter + Send + Sync> = Arc::new(storage);

        if let Some(raw) = &self.stored_log {
            storage.set(zenchat_agent::LOG_KEY, raw).await?;
        }

        let mock_provider = Arc::new(if self.gated {
            MockProvider::gated(self.replies)
        } else {
            MockProvider::with_replies(self.replies)
        });

        let persona = Persona::resolve(&config.assistant).await;
        let controller = Arc::new(
            ConversationController::new(
                mock_provider.clone() as Arc<dyn ProviderAdapter + Send + Sync>,
                ConversationStore::new(storage.clone()),
                persona.clone(),
                config.ui.default_theme,
            )
            .await,
        );

        Ok(TestHarness {
            mock_provider,
            storage,
            controller,
            persona,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a mock provider and temp storage.
pub struct TestHarness {
    /// The mock completion provider.
    pub mock_provider: Arc<MockProvider>,
    /// SQLite storage adapter (temp DB, cleaned up on drop).
    pub storage: Arc<dyn StorageAdapter + Send + Sync>,
    /// The controller under test.
    pub controller: Arc<ConversationController>,
    pub persona: Persona,
    /// Configuration the harness was built from.
    pub config: ZenConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A typed view of the harness storage.
    pub fn store(&self) -> ConversationStore {
        ConversationStore::new(self.storage.clone())
    }

    /// A fresh controller over the same storage and provider, as after a restart.
    pub async fn restart(&self) -> ConversationController {
        ConversationController::new(
            self.mock_provider.clone() as Arc<dyn ProviderAdapter + Send + Sync>,
            self.store(),
            self.persona.clone(),
            self.config.ui.default_theme,
        )
        .await
    }
}
