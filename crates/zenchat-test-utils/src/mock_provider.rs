// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with scripted replies,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Semaphore};

use zenchat_core::{
    AdapterType, CompletionReply, CompletionRequest, HealthStatus, PluginAdapter,
    ProviderAdapter, ZenError,
};

/// One scripted provider outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// A reply with text.
    Text(String),
    /// A reply with no usable candidate.
    Empty,
    /// A transport failure with the given message.
    Fail(String),
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(message.into())
    }
}

/// A mock completion provider that returns scripted replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned. A gated provider holds every
/// request until [`MockProvider::release`] grants it a permit.
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty reply queue.
    pub fn new() -> Self {
        Self::with_replies(Vec::new())
    }

    /// Create a mock provider pre-loaded with the given replies.
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            requests: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    /// Create a mock provider whose requests wait for [`release`](Self::release).
    pub fn gated(replies: Vec<MockReply>) -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::with_replies(replies)
        }
    }

    /// Let `n` held requests proceed.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Add a reply to the end of the queue.
    pub async fn push_reply(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::text("mock response"))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, ZenError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ZenError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, ZenError> {
        self.requests.lock().await.push(request);

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|e| ZenError::Internal(format!("mock gate closed: {e}")))?
                .forget();
        }

        match self.next_reply().await {
            MockReply::Text(text) => Ok(CompletionReply { text: Some(text) }),
            MockReply::Empty => Ok(CompletionReply::default()),
            MockReply::Fail(message) => Err(ZenError::Provider {
                message,
                source: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn request() -> CompletionRequest {
        CompletionRequest {
            system_instruction: "test".into(),
            turns: vec![],
        }
    }

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new();
        let reply = provider.complete(request()).await.unwrap();
        assert_eq!(reply.text.as_deref(), Some("mock response"));
    }

    #[tokio::test]
    async fn queued_replies_returned_in_order() {
        let provider = MockProvider::with_replies(vec![
            MockReply::text("first"),
            MockReply::Empty,
            MockReply::fail("boom"),
        ]);

        assert_eq!(
            provider.complete(request()).await.unwrap().text.as_deref(),
            Some("first")
        );
        assert_eq!(provider.complete(request()).await.unwrap().text, None);
        let err = provider.complete(request()).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
        assert_eq!(provider.call_count().await, 3);
    }

    #[tokio::test]
    async fn push_reply_after_construction() {
        let provider = MockProvider::new();
        provider.push_reply(MockReply::text("dynamic")).await;
        assert_eq!(
            provider.complete(request()).await.unwrap().text.as_deref(),
            Some("dynamic")
        );
    }

    #[tokio::test]
    async fn requests_are_captured() {
        let provider = MockProvider::new();
        provider.complete(request()).await.unwrap();
        assert_eq!(provider.requests().await, vec![request()]);
    }

    #[tokio::test(start_paused = true)]
    async fn gated_provider_holds_until_released() {
        let provider = Arc::new(MockProvider::gated(vec![MockReply::text("held")]));

        let task = tokio::spawn({
            let provider = provider.clone();
            async move { provider.complete(request()).await }
        });

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!task.is_finished());
        assert_eq!(provider.call_count().await, 1);

        provider.release(1);
        let reply = task.await.unwrap().unwrap();
        assert_eq!(reply.text.as_deref(), Some("held"));
    }
}
