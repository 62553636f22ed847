// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation types shared by the adapter traits and the agent pipeline.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
}

// --- Conversation log ---

/// Whether an attachment renders inline as an image or travels as a named document.
///
/// Computed once when the attachment is encoded; everything downstream
/// branches on this instead of re-inspecting the MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Document,
}

impl AttachmentKind {
    /// Classifies a MIME type. Anything under `image/` is an image.
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            Self::Image
        } else {
            Self::Document
        }
    }
}

/// A transport-ready file carried by a user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Base64 (standard alphabet, padded) file content.
    pub data: String,
    /// MIME type reported for the file.
    pub mime_type: String,
    /// Original file name.
    pub name: String,
    /// Image or document.
    pub kind: AttachmentKind,
}

/// One inline formatting token of a bot reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum InlineSpan {
    Plain(String),
    Bold(String),
    Italic(String),
    Underline(String),
    Code(String),
}

impl InlineSpan {
    /// The literal text inside the span.
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::Plain(t)
            | InlineSpan::Bold(t)
            | InlineSpan::Italic(t)
            | InlineSpan::Underline(t)
            | InlineSpan::Code(t) => t,
        }
    }
}

/// A message typed by the user, optionally carrying one attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    /// Text as sent. Document attachments prefix a `[FILE] <name>` marker line.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

/// A message produced by the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotMessage {
    /// Reply text as received (trimmed), used when the turn is replayed to the model.
    pub content: String,
    /// Formatted rendition of `content`.
    #[serde(default)]
    pub spans: Vec<InlineSpan>,
}

impl BotMessage {
    /// A bot message with no markup: the whole text is one plain span.
    pub fn plain(text: impl Into<String>) -> Self {
        let content = text.into();
        let spans = if content.is_empty() {
            Vec::new()
        } else {
            vec![InlineSpan::Plain(content.clone())]
        };
        Self { content, spans }
    }
}

/// One entry of the conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    User(UserMessage),
    Bot(BotMessage),
}

impl Message {
    /// The raw text content regardless of role.
    pub fn content(&self) -> &str {
        match self {
            Message::User(m) => &m.content,
            Message::Bot(m) => &m.content,
        }
    }

    /// The attachment, if this is a user message that carries one.
    pub fn attachment(&self) -> Option<&Attachment> {
        match self {
            Message::User(m) => m.attachment.as_ref(),
            Message::Bot(_) => None,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Message::User(_))
    }
}

/// Ordered, append-only message history.
///
/// Serialized as a bare JSON array so the stored value stays a plain list of messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationLog(Vec<Message>);

impl ConversationLog {
    /// A log holding only the seeded greeting.
    pub fn seeded(greeting: &str) -> Self {
        Self(vec![Message::Bot(BotMessage::plain(greeting))])
    }

    pub fn push(&mut self, message: Message) {
        self.0.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }
}

impl From<Vec<Message>> for ConversationLog {
    fn from(messages: Vec<Message>) -> Self {
        Self(messages)
    }
}

// --- Preferences ---

/// Colour theme preference.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The opposite theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

// --- Provider request types ---

/// Who produced a turn, in the completion endpoint's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Speaker {
    User,
    Model,
}

/// A piece of turn content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    /// Base64 file content with its MIME type.
    InlineData { mime_type: String, data: String },
}

/// One entry of the request history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub parts: Vec<Part>,
}

/// A provider-neutral completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Persona instruction, sent once per request.
    pub system_instruction: String,
    pub turns: Vec<Turn>,
}

/// The settled result of a completion call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionReply {
    /// First candidate's first text part. `None` when the response carried no usable text.
    pub text: Option<String>,
}
