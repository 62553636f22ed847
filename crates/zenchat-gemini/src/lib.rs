// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini provider adapter for zenchat.
//!
//! This crate implements [`ProviderAdapter`] for the Gemini `generateContent`
//! method. Each call is a single non-streaming request carrying the whole
//! projected history.

pub mod client;
pub mod types;

use async_trait::async_trait;
use tracing::{debug, info};
use zenchat_config::model::ZenConfig;
use zenchat_core::{
    AdapterType, CompletionReply, CompletionRequest, HealthStatus, Part, PluginAdapter,
    ProviderAdapter, ZenError,
};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, InlineData, RequestPart, SystemInstruction};

/// Environment variable consulted when `gemini.api_key` is not configured.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` env var -> error.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Creates a new Gemini provider from the given configuration.
    pub fn new(config: &ZenConfig) -> Result<Self, ZenError> {
        let api_key = resolve_api_key(&config.gemini.api_key)?;
        let client = GeminiClient::new(api_key, &config.gemini)?;

        info!(model = config.gemini.model, "Gemini provider initialized");

        Ok(Self { client })
    }

    /// Converts a provider-neutral request into the Gemini wire shape.
    pub fn to_request(request: &CompletionRequest) -> GenerateContentRequest {
        let contents = request
            .turns
            .iter()
            .map(|turn| Content {
                role: turn.speaker.to_string(),
                parts: turn.parts.iter().map(to_request_part).collect(),
            })
            .collect();

        GenerateContentRequest {
            contents,
            system_instruction: SystemInstruction {
                parts: vec![RequestPart::Text {
                    text: request.system_instruction.clone(),
                }],
            },
        }
    }
}

fn to_request_part(part: &Part) -> RequestPart {
    match part {
        Part::Text(text) => RequestPart::Text { text: text.clone() },
        Part::InlineData { mime_type, data } => RequestPart::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.clone(),
                data: data.clone(),
            },
        },
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, ZenError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ZenError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, ZenError> {
        let wire = Self::to_request(&request);
        debug!(
            model = self.client.model(),
            turns = wire.contents.len(),
            "sending completion request"
        );

        let response = self.client.generate_content(&wire).await?;
        Ok(CompletionReply {
            text: response.first_text().map(str::to_string),
        })
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, ZenError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(ZenError::Config(
            "Gemini API key not found. Set gemini.api_key in config or GEMINI_API_KEY environment variable.".into(),
        )),
    }
}
