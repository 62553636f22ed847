// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assistant persona: display name, seeded greeting and system instruction.

use tracing::warn;
use zenchat_config::model::AssistantConfig;

/// The fixed identity the assistant presents in every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub name: String,
    pub greeting: String,
    pub system_instruction: String,
}

impl Persona {
    /// Resolves the persona from configuration.
    ///
    /// # System Instruction Resolution
    /// 1. `system_prompt_file` if set, readable and non-empty
    /// 2. `system_prompt` if set and non-empty
    /// 3. Default: `You are a user friendly "AI assistant"  {name}.`
    pub async fn resolve(config: &AssistantConfig) -> Self {
        let system_instruction = load_system_instruction(
            &config.name,
            &config.system_prompt,
            &config.system_prompt_file,
        )
        .await;

        Self {
            name: config.name.clone(),
            greeting: config.greeting.clone(),
            system_instruction,
        }
    }
}

/// The instruction used when none is configured.
pub fn default_system_instruction(name: &str) -> String {
    format!("You are a user friendly \"AI assistant\"  {name}.")
}

async fn load_system_instruction(
    name: &str,
    inline_prompt: &Option<String>,
    prompt_file: &Option<String>,
) -> String {
    if let Some(file_path) = prompt_file {
        match tokio::fs::read_to_string(file_path).await {
            Ok(content) => {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
                warn!(path = %file_path, "system prompt file is empty, falling back");
            }
            Err(e) => {
                warn!(path = %file_path, error = %e, "failed to read system prompt file, falling back");
            }
        }
    }

    if let Some(prompt) = inline_prompt
        && !prompt.trim().is_empty()
    {
        return prompt.clone();
    }

    default_system_instruction(name)
}
