// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for completion endpoints.

use async_trait::async_trait;

use crate::error::ZenError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionReply, CompletionRequest};

/// Adapter for a remote completion endpoint.
///
/// One call per submission; the reply is returned whole.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a completion request and returns the settled reply.
    ///
    /// A response without a usable candidate is `Ok` with `text: None`;
    /// transport failures are `Err`.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, ZenError>;
}
