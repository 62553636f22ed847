// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation pipeline for zenchat.
//!
//! The [`ConversationController`] is the central coordinator that:
//! - Appends user messages, with an optional attachment, to the log
//! - Projects the log into a completion request and awaits the reply
//! - Formats the reply into inline spans and appends it
//! - Persists the log and theme through a [`ConversationStore`]

pub mod attachment;
pub mod controller;
pub mod display;
pub mod formatter;
pub mod persona;
pub mod projector;
pub mod store;

pub use attachment::{AttachmentPreview, PendingAttachment, is_accepted, truncate_file_name};
pub use controller::{ConversationController, ERROR_REPLY, FALLBACK_REPLY, RequestState, SubmitOutcome};
pub use display::{attachment_label, display_content};
pub use formatter::format_reply;
pub use persona::Persona;
pub use projector::{DEFAULT_ATTACHMENT_INSTRUCTION, project};
pub use store::{ConversationStore, LOG_KEY, THEME_KEY};
