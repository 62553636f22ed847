// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! Provides [`GeminiClient`] which handles request construction,
//! authentication, and transient error retry.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};
use zenchat_config::model::GeminiConfig;
use zenchat_core::ZenError;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// HTTP client for Gemini API communication.
///
/// The API key travels in the `x-goog-api-key` header so it never appears in
/// request URLs or in the errors that quote them.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
    max_retries: u32,
    timeout: Duration,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    pub fn new(api_key: String, config: &GeminiConfig) -> Result<Self, ZenError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&api_key)
            .map_err(|e| ZenError::Config(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ZenError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            timeout,
        })
    }

    /// Returns the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full URL of the `generateContent` method for the configured model.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Sends a request and returns the parsed response.
    ///
    /// On transient statuses (429, 500, 503, 529) retries up to `max_retries`
    /// times, one second apart. A JSON body that does not match the response
    /// schema yields an empty response rather than an error; a body that is
    /// not JSON at all is an error.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ZenError> {
        let url = self.endpoint();
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(request)
                .send()
                .await
                .map_err(|e| self.transport_error(e))?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| self.transport_error(e))?;
                return parse_success_body(&body);
            }

            let body = response.text().await.unwrap_or_default();

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, "transient error, will retry");
                last_error = Some(api_error(status, &body));
                continue;
            }

            return Err(api_error(status, &body));
        }

        Err(last_error.unwrap_or_else(|| ZenError::Provider {
            message: "completion request failed after retries".into(),
            source: None,
        }))
    }

    fn transport_error(&self, e: reqwest::Error) -> ZenError {
        if e.is_timeout() {
            return ZenError::Timeout {
                duration: self.timeout,
            };
        }
        ZenError::Provider {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        }
    }
}

fn parse_success_body(body: &str) -> Result<GenerateContentResponse, ZenError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ZenError::Provider {
            message: format!("response body is not JSON: {e}"),
            source: Some(Box::new(e)),
        })?;

    match serde_json::from_value::<GenerateContentResponse>(value) {
        Ok(parsed) => {
            if let Some(usage) = &parsed.usage_metadata {
                debug!(
                    prompt_tokens = usage.prompt_token_count,
                    candidate_tokens = usage.candidates_token_count,
                    "token usage"
                );
            }
            Ok(parsed)
        }
        Err(e) => {
            warn!(error = %e, "unexpected response shape, treating as empty");
            Ok(GenerateContentResponse::default())
        }
    }
}

fn api_error(status: reqwest::StatusCode, body: &str) -> ZenError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!(
            "Gemini API error ({}): {}",
            api_err.error.status.as_deref().unwrap_or(status.as_str()),
            api_err.error.message
        ),
        Err(_) => format!("API returned {status}"),
    };
    ZenError::Provider {
        message,
        source: None,
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503 | 529)
}
