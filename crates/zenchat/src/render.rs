// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering of conversation messages.
//!
//! Bot replies are rendered from their inline spans. Control characters in
//! message text are escaped before styling, so nothing in a reply or an
//! attachment name reaches the terminal as an escape sequence.

use std::borrow::Cow;

use colored::{Color, ColoredString, Colorize};
use zenchat_agent::{AttachmentPreview, attachment_label, display_content};
use zenchat_core::{AttachmentKind, InlineSpan, Message, Theme};

/// Colours used for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub assistant: Color,
    pub user: Color,
    pub code: Color,
    pub chip: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                assistant: Color::Blue,
                user: Color::Magenta,
                code: Color::Red,
                chip: Color::Black,
            },
            Theme::Dark => Self {
                assistant: Color::BrightCyan,
                user: Color::BrightMagenta,
                code: Color::BrightYellow,
                chip: Color::BrightWhite,
            },
        }
    }
}

/// Escapes control characters other than newline and tab.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_unsafe) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_unsafe(c) {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn is_unsafe(c: char) -> bool {
    c.is_control() && c != '\n' && c != '\t'
}

fn render_span(span: &InlineSpan, palette: Palette) -> ColoredString {
    let text = sanitize(span.text());
    let text = text.as_ref();
    match span {
        InlineSpan::Plain(_) => text.normal(),
        InlineSpan::Bold(_) => text.bold(),
        InlineSpan::Italic(_) => text.italic(),
        InlineSpan::Underline(_) => text.underline(),
        InlineSpan::Code(_) => text.color(palette.code),
    }
}

/// Styled text of a span sequence.
pub fn render_spans(spans: &[InlineSpan], palette: Palette) -> String {
    spans
        .iter()
        .map(|span| render_span(span, palette).to_string())
        .collect()
}

/// One message as a prompt-prefixed block.
pub fn render_message(message: &Message, assistant_name: &str, theme: Theme) -> String {
    let palette = Palette::for_theme(theme);
    match message {
        Message::Bot(bot) => {
            let body = if bot.spans.is_empty() {
                sanitize(&bot.content).into_owned()
            } else {
                render_spans(&bot.spans, palette)
            };
            format!("{}> {body}", assistant_name.color(palette.assistant).bold())
        }
        Message::User(user) => {
            let mut out = format!("{}> ", "you".color(palette.user).bold());
            if let Some(att) = &user.attachment
                && att.kind == AttachmentKind::Image
            {
                out.push_str(&format!("{} ", format!("[image: {}]", sanitize(&att.name)).color(palette.chip)));
            }
            if let Some(label) = attachment_label(user) {
                out.push_str(&format!("{} ", format!("[file: {}]", sanitize(&label)).color(palette.chip)));
            }
            out.push_str(&sanitize(display_content(user)));
            out
        }
    }
}

/// Preview line for a pending attachment.
pub fn render_preview(preview: &AttachmentPreview, theme: Theme) -> String {
    let palette = Palette::for_theme(theme);
    let text = match preview {
        AttachmentPreview::Image { name, mime_type } => format!("attached image {} ({mime_type})", sanitize(name)),
        AttachmentPreview::Document { label } => format!("attached file {}", sanitize(label)),
    };
    text.color(palette.chip).to_string()
}
