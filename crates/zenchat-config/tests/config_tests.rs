// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the zenchat configuration system.

use serial_test::serial;
use zenchat_config::diagnostic::ConfigError;
use zenchat_config::model::ZenConfig;
use zenchat_config::{
    load_and_validate_str, load_config_from_path, load_config_from_str, to_redacted_toml,
};
use zenchat_core::Theme;

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_zen_config() {
    let toml = r#"
[assistant]
name = "Sage"
greeting = "Hello, I'm Sage."
system_prompt = "Be brief."
log_level = "debug"

[gemini]
api_key = "AIza-test"
model = "gemini-2.5-pro"
base_url = "http://localhost:9999/v1beta"
timeout_secs = 15
max_retries = 2

[storage]
database_path = "/tmp/zen.db"
wal_mode = false

[ui]
default_theme = "dark"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.assistant.name, "Sage");
    assert_eq!(config.assistant.greeting, "Hello, I'm Sage.");
    assert_eq!(config.assistant.system_prompt.as_deref(), Some("Be brief."));
    assert_eq!(config.assistant.log_level, "debug");
    assert_eq!(config.gemini.api_key.as_deref(), Some("AIza-test"));
    assert_eq!(config.gemini.model, "gemini-2.5-pro");
    assert_eq!(config.gemini.base_url, "http://localhost:9999/v1beta");
    assert_eq!(config.gemini.timeout_secs, 15);
    assert_eq!(config.gemini.max_retries, 2);
    assert_eq!(config.storage.database_path, "/tmp/zen.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.ui.default_theme, Theme::Dark);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.assistant.name, "Zen");
    assert_eq!(
        config.assistant.greeting,
        "Hi there! I'm Zen, your personal assistant. How can I help you today?"
    );
    assert!(config.assistant.system_prompt.is_none());
    assert!(config.assistant.system_prompt_file.is_none());
    assert_eq!(config.assistant.log_level, "info");
    assert!(config.gemini.api_key.is_none());
    assert_eq!(config.gemini.model, "gemini-2.5-flash");
    assert_eq!(
        config.gemini.base_url,
        "https://generativelanguage.googleapis.com/v1beta"
    );
    assert_eq!(config.gemini.timeout_secs, 60);
    assert_eq!(config.gemini.max_retries, 1);
    assert!(config.storage.database_path.ends_with("zenchat.db"));
    assert!(config.storage.wal_mode);
    assert_eq!(config.ui.default_theme, Theme::Light);
}

/// Unknown field in [gemini] produces an error naming the key.
#[test]
fn unknown_field_in_gemini_produces_error() {
    let toml = r#"
[gemini]
modle = "gemini-2.5-flash"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("modle"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[telegram]
bot_token = "x"
"#;

    assert!(load_config_from_str(toml).is_err());
}

/// Unknown keys become UnknownKey diagnostics with a suggestion.
#[test]
fn load_and_validate_suggests_close_key() {
    let toml = r#"
[assistant]
greting = "hi"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "greting");
            assert_eq!(suggestion.as_deref(), Some("greeting"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// A theme outside light/dark is rejected at load time.
#[test]
fn invalid_theme_is_rejected() {
    let toml = r#"
[ui]
default_theme = "sepia"
"#;

    assert!(load_and_validate_str(toml).is_err());
}

/// A string where a number is expected reports the dotted key.
#[test]
fn invalid_type_reports_key_path() {
    let toml = r#"
[gemini]
timeout_secs = "soon"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail");
    match &errors[0] {
        ConfigError::InvalidType { key, .. } => assert_eq!(key, "gemini.timeout_secs"),
        other => panic!("expected InvalidType, got {other:?}"),
    }
}

/// Semantic validation runs after a successful load.
#[test]
fn load_and_validate_runs_validation() {
    let toml = r#"
[gemini]
timeout_secs = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero timeout should fail");
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

/// Missing config files are silently skipped.
#[test]
#[serial]
fn missing_config_file_is_skipped() {
    let config = load_config_from_path(std::path::Path::new("/nonexistent/zenchat.toml"))
        .expect("missing file should be silently skipped");
    assert_eq!(config.assistant.name, "Zen");
}

/// ZENCHAT_GEMINI_MODEL overrides gemini.model.
#[test]
#[serial]
fn env_var_overrides_gemini_model() {
    // SAFETY: serialized with every other env-reading test in this file.
    unsafe { std::env::set_var("ZENCHAT_GEMINI_MODEL", "gemini-env-model") };
    let result = load_config_from_path(std::path::Path::new("/nonexistent/zenchat.toml"));
    unsafe { std::env::remove_var("ZENCHAT_GEMINI_MODEL") };

    let config = result.expect("env override should load");
    assert_eq!(config.gemini.model, "gemini-env-model");
}

/// ZENCHAT_UI_DEFAULT_THEME maps to ui.default_theme, not ui.default.theme.
#[test]
#[serial]
fn env_var_with_underscored_key_maps_to_single_field() {
    unsafe { std::env::set_var("ZENCHAT_UI_DEFAULT_THEME", "dark") };
    let result = load_config_from_path(std::path::Path::new("/nonexistent/zenchat.toml"));
    unsafe { std::env::remove_var("ZENCHAT_UI_DEFAULT_THEME") };

    let config = result.expect("env override should load");
    assert_eq!(config.ui.default_theme, Theme::Dark);
}

/// The printed config never shows the API key.
#[test]
fn redacted_toml_masks_api_key() {
    let mut config = ZenConfig::default();
    config.gemini.api_key = Some("AIza-very-secret".to_string());

    let rendered = to_redacted_toml(&config).unwrap();
    assert!(!rendered.contains("AIza-very-secret"));
    assert!(rendered.contains("[REDACTED]"));
    assert!(rendered.contains("[gemini]"));
}
