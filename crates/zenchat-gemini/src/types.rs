// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini `generateContent` request/response types.

use serde::{Deserialize, Serialize};

// --- Request types ---

/// Body of a `models/{model}:generateContent` call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    /// Conversation history, oldest first.
    pub contents: Vec<Content>,

    /// Persona instruction applied to the whole request.
    #[serde(rename = "systemInstruction")]
    pub system_instruction: SystemInstruction,
}

/// One turn of the history.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    /// "user" or "model".
    pub role: String,
    pub parts: Vec<RequestPart>,
}

/// A request part: text or inline base64 data.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RequestPart {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

/// Inline file payload.
#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

/// System instruction wrapper; only text parts are sent.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<RequestPart>,
}

// --- Response types ---

/// Body of a successful `generateContent` response.
///
/// Every field defaults so that partial responses (safety blocks, empty
/// candidate lists) still deserialize.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    #[serde(default, rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,

    #[serde(default, rename = "modelVersion")]
    pub model_version: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if present and non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
    }
}

/// A generated candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,

    #[serde(default, rename = "finishReason")]
    pub finish_reason: Option<String>,
}

/// Content of a candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,

    #[serde(default)]
    pub role: Option<String>,
}

/// A response part. Non-text parts deserialize with `text: None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageMetadata {
    #[serde(default, rename = "promptTokenCount")]
    pub prompt_token_count: Option<u32>,

    #[serde(default, rename = "candidatesTokenCount")]
    pub candidates_token_count: Option<u32>,

    #[serde(default, rename = "totalTokenCount")]
    pub total_token_count: Option<u32>,
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// Error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<u16>,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
