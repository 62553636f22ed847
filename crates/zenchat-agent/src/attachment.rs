// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attachment encoding: reading a chosen file and turning it into a
//! transport-ready [`Attachment`].
//!
//! A file is read once when it is chosen and held as raw bytes in a
//! [`PendingAttachment`] until the next submit consumes it. Base64 encoding
//! happens when the pending attachment is consumed.

use std::path::Path;

use base64::Engine;
use tracing::debug;
use zenchat_core::{Attachment, AttachmentKind, ZenError};

/// File names up to this many characters are displayed unchanged.
const MAX_DISPLAY_NAME: usize = 16;

/// MIME type used for files whose extension is not in the accepted table.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Extensions the file picker offers, with the MIME type reported for each.
const ACCEPTED_TYPES: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("pdf", "application/pdf"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
];

/// How a pending attachment is previewed before sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentPreview {
    /// Renderable inline image.
    Image { name: String, mime_type: String },
    /// Document chip showing a truncated file name.
    Document { label: String },
}

/// A file chosen but not yet sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttachment {
    name: String,
    mime_type: String,
    kind: AttachmentKind,
    bytes: Vec<u8>,
}

impl PendingAttachment {
    /// Wraps already-read file content.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime_type = mime_type.into();
        Self {
            name: name.into(),
            kind: AttachmentKind::from_mime(&mime_type),
            mime_type,
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Preview descriptor derived from the attachment kind.
    pub fn preview(&self) -> AttachmentPreview {
        match self.kind {
            AttachmentKind::Image => AttachmentPreview::Image {
                name: self.name.clone(),
                mime_type: self.mime_type.clone(),
            },
            AttachmentKind::Document => AttachmentPreview::Document {
                label: truncate_file_name(&self.name),
            },
        }
    }

    /// Base64-encodes the content into a message attachment.
    pub fn encode(&self) -> Attachment {
        Attachment {
            data: base64::engine::general_purpose::STANDARD.encode(&self.bytes),
            mime_type: self.mime_type.clone(),
            name: self.name.clone(),
            kind: self.kind,
        }
    }
}

/// Shortens long file names to the first 8 and last 4 characters.
///
/// Names of at most 16 characters are returned unchanged. Counts characters,
/// not bytes.
pub fn truncate_file_name(name: &str) -> String {
    let count = name.chars().count();
    if count <= MAX_DISPLAY_NAME {
        return name.to_string();
    }
    let head: String = name.chars().take(8).collect();
    let tail: String = name.chars().skip(count - 4).collect();
    format!("{head}...{tail}")
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// MIME type for a path, looked up by extension.
pub fn mime_for_extension(path: &Path) -> &'static str {
    extension(path)
        .and_then(|ext| {
            ACCEPTED_TYPES
                .iter()
                .find(|(accepted, _)| *accepted == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or(FALLBACK_MIME_TYPE)
}

/// Whether the file picker accepts this path.
pub fn is_accepted(path: &Path) -> bool {
    extension(path).is_some_and(|ext| ACCEPTED_TYPES.iter().any(|(accepted, _)| *accepted == ext))
}

/// Reads a file from disk into a [`PendingAttachment`].
pub async fn read_attachment(path: &Path) -> Result<PendingAttachment, ZenError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ZenError::Attachment {
            name: name.clone(),
            source: Box::new(e),
        })?;

    let mime_type = mime_for_extension(path);
    debug!(name, mime_type, bytes = bytes.len(), "attachment read");
    Ok(PendingAttachment::new(name, mime_type, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_unchanged() {
        assert_eq!(truncate_file_name("a.txt"), "a.txt");
        assert_eq!(truncate_file_name("exactly16chars.x"), "exactly16chars.x");
    }

    #[test]
    fn long_names_keep_head_and_tail() {
        assert_eq!(truncate_file_name("annual-report-2024.pdf"), "annual-r....pdf");
        assert_eq!(truncate_file_name("seventeen-chars.x"), "seventee...rs.x");
    }

    #[test]
    fn truncation_counts_characters() {
        let name = "ñññññññññññññññññ.txt";
        let truncated = truncate_file_name(name);
        assert_eq!(truncated, "ññññññññ....txt");
    }

    #[test]
    fn mime_table_lookup() {
        assert_eq!(mime_for_extension(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_for_extension(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_for_extension(Path::new("notes.txt")), "text/plain");
        assert_eq!(mime_for_extension(Path::new("archive.zip")), FALLBACK_MIME_TYPE);
        assert_eq!(mime_for_extension(Path::new("Makefile")), FALLBACK_MIME_TYPE);
    }

    #[test]
    fn accepted_extensions() {
        assert!(is_accepted(Path::new("/tmp/report.docx")));
        assert!(is_accepted(Path::new("cat.GIF")));
        assert!(!is_accepted(Path::new("run.sh")));
        assert!(!is_accepted(Path::new("noext")));
    }

    #[test]
    fn preview_depends_on_kind() {
        let image = PendingAttachment::new("cat.png", "image/png", vec![1, 2, 3]);
        assert_eq!(image.kind(), AttachmentKind::Image);
        assert!(matches!(image.preview(), AttachmentPreview::Image { .. }));

        let doc = PendingAttachment::new("annual-report-2024.pdf", "application/pdf", vec![]);
        assert_eq!(
            doc.preview(),
            AttachmentPreview::Document {
                label: "annual-r....pdf".into()
            }
        );
    }

    #[test]
    fn encode_produces_padded_standard_base64() {
        let pending = PendingAttachment::new("hi.txt", "text/plain", b"hi".to_vec());
        let encoded = pending.encode();
        assert_eq!(encoded.data, "aGk=");
        assert_eq!(encoded.mime_type, "text/plain");
        assert_eq!(encoded.name, "hi.txt");
        assert_eq!(encoded.kind, AttachmentKind::Document);
    }

    #[tokio::test]
    async fn read_attachment_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let pending = read_attachment(&path).await.unwrap();
        assert_eq!(pending.name(), "photo.png");
        assert_eq!(pending.mime_type(), "image/png");
        assert_eq!(pending.len(), 4);
    }

    #[tokio::test]
    async fn unreadable_file_is_an_attachment_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_attachment(&dir.path().join("missing.pdf"))
            .await
            .unwrap_err();
        match err {
            ZenError::Attachment { name, .. } => assert_eq!(name, "missing.pdf"),
            other => panic!("expected Attachment error, got {other:?}"),
        }
    }
}
