// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply formatting: turns the model's markdown-ish emphasis into
//! [`InlineSpan`] tokens.
//!
//! Rules run in a fixed order and each rule only scans text that earlier
//! rules left plain, so `***x***` becomes one bold span rather than bold
//! nested in italic. Everything that is not a recognized delimiter pair stays
//! literal text inside a plain span.

use std::sync::LazyLock;

use regex::Regex;
use zenchat_core::InlineSpan;

type SpanCtor = fn(String) -> InlineSpan;

static RULES: LazyLock<Vec<(Regex, SpanCtor)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"\*\*\*(.*?)\*\*\*").unwrap(), InlineSpan::Bold as SpanCtor),
        (Regex::new(r"\*\*(.*?)\*\*").unwrap(), InlineSpan::Bold as SpanCtor),
        (Regex::new(r"\*(.*?)\*").unwrap(), InlineSpan::Italic as SpanCtor),
        (Regex::new(r"__(.*?)__").unwrap(), InlineSpan::Underline as SpanCtor),
        (Regex::new(r"`(.*?)`").unwrap(), InlineSpan::Code as SpanCtor),
    ]
});

/// Formats raw reply text into inline spans.
///
/// Leading whitespace of a leading plain span and trailing whitespace of a
/// trailing plain span are trimmed. Empty spans are dropped.
pub fn format_reply(text: &str) -> Vec<InlineSpan> {
    let mut spans = vec![InlineSpan::Plain(text.to_string())];

    for (pattern, make) in RULES.iter() {
        spans = spans
            .into_iter()
            .flat_map(|span| match span {
                InlineSpan::Plain(plain) => split_plain(&plain, pattern, *make),
                styled => vec![styled],
            })
            .collect();
    }

    trim_ends(&mut spans);
    spans.retain(|span| !span.text().is_empty());
    spans
}

fn split_plain(text: &str, pattern: &Regex, make: SpanCtor) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut last = 0;

    for caps in pattern.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push(InlineSpan::Plain(text[last..whole.start()].to_string()));
        }
        out.push(make(inner.as_str().to_string()));
        last = whole.end();
    }

    if last < text.len() {
        out.push(InlineSpan::Plain(text[last..].to_string()));
    }
    out
}

fn trim_ends(spans: &mut [InlineSpan]) {
    if let Some(InlineSpan::Plain(first)) = spans.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(InlineSpan::Plain(last)) = spans.last_mut() {
        *last = last.trim_end().to_string();
    }
}

/// Concatenated text of all spans, without delimiters.
pub fn spans_to_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}
