// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty persona strings, URL schemes, and sane retry bounds.

use crate::diagnostic::ConfigError;
use crate::model::ZenConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const MAX_RETRIES_LIMIT: u32 = 5;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ZenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let required = [
        ("assistant.name", &config.assistant.name),
        ("assistant.greeting", &config.assistant.greeting),
        ("gemini.model", &config.gemini.model),
        ("storage.database_path", &config.storage.database_path),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.assistant.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "assistant.log_level `{}` is not one of: {}",
                config.assistant.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let base_url = config.gemini.base_url.trim();
    if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
        errors.push(ConfigError::Validation {
            message: format!("gemini.base_url `{base_url}` must be an http(s) URL"),
        });
    }

    if config.gemini.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.gemini.max_retries > MAX_RETRIES_LIMIT {
        errors.push(ConfigError::Validation {
            message: format!(
                "gemini.max_retries must be at most {MAX_RETRIES_LIMIT}, got {}",
                config.gemini.max_retries
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = ZenConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = ZenConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("storage.database_path"));
    }

    #[test]
    fn blank_greeting_fails_validation() {
        let mut config = ZenConfig::default();
        config.assistant.greeting = "   ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("assistant.greeting"));
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = ZenConfig::default();
        config.gemini.base_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("gemini.base_url"));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = ZenConfig::default();
        config.gemini.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = ZenConfig::default();
        config.assistant.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("verbose"));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = ZenConfig::default();
        config.assistant.name = "".to_string();
        config.gemini.model = "".to_string();
        config.gemini.max_retries = 9;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
