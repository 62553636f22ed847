// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for zenchat.

use thiserror::Error;

/// The primary error type used across all zenchat adapter traits and core operations.
#[derive(Debug, Error)]
pub enum ZenError {
    /// Configuration errors (missing API key, unreadable prompt file, bad header value).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Completion endpoint errors (network failure, non-success status, non-JSON body).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A chosen attachment could not be read.
    #[error("could not read attachment `{name}`: {source}")]
    Attachment {
        name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
