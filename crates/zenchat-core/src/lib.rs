// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for zenchat.
//!
//! This crate provides the trait definitions, error type, and conversation
//! types used throughout the workspace. The provider and storage adapters
//! implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ZenError;
pub use types::{
    AdapterType, Attachment, AttachmentKind, BotMessage, CompletionReply, CompletionRequest,
    ConversationLog, HealthStatus, InlineSpan, Message, Part, Speaker, Theme, Turn, UserMessage,
};

pub use traits::{PluginAdapter, ProviderAdapter, StorageAdapter};
