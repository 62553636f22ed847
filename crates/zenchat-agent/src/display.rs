// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Presentation helpers for user messages carrying attachments.

use zenchat_core::{AttachmentKind, UserMessage};

use crate::attachment::truncate_file_name;

/// The marker line prefixed to a user message that carries a document.
pub fn file_marker(name: &str) -> String {
    format!("[FILE] {name}\n")
}

/// Removes a leading marker line for `name`, leaving the rest untouched.
///
/// Only the exact marker produced by [`file_marker`] is stripped.
pub fn strip_file_marker<'a>(content: &'a str, name: &str) -> &'a str {
    content
        .strip_prefix(file_marker(name).as_str())
        .unwrap_or(content)
}

/// Text to show for a user message.
///
/// Document attachments have their marker line removed; image attachments and
/// plain messages are shown as stored.
pub fn display_content(message: &UserMessage) -> &str {
    match &message.attachment {
        Some(att) if att.kind == AttachmentKind::Document => {
            strip_file_marker(&message.content, &att.name)
        }
        _ => &message.content,
    }
}

/// Chip label for a document attachment, `None` for images and plain messages.
pub fn attachment_label(message: &UserMessage) -> Option<String> {
    message
        .attachment
        .as_ref()
        .filter(|att| att.kind == AttachmentKind::Document)
        .map(|att| truncate_file_name(&att.name))
}
