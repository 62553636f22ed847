// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./zenchat.toml` > `~/.config/zenchat/zenchat.toml` > `/etc/zenchat/zenchat.toml`
//! with environment variable overrides via `ZENCHAT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ZenConfig;

/// Top-level sections that environment variables may address.
const SECTIONS: &[&str] = &["assistant", "gemini", "storage", "ui"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/zenchat/zenchat.toml` (system-wide)
/// 3. `~/.config/zenchat/zenchat.toml` (user XDG config)
/// 4. `./zenchat.toml` (local directory)
/// 5. `ZENCHAT_*` environment variables
pub fn load_config() -> Result<ZenConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ZenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZenConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ZenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZenConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ZenConfig::default()))
        .merge(Toml::file("/etc/zenchat/zenchat.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("zenchat/zenchat.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("zenchat.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `ZENCHAT_GEMINI_API_KEY` maps to `gemini.api_key`, not `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("ZENCHAT_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env var name onto a dotted config path.
///
/// Figment hands over the name in its original case, so it is lowercased first.
pub(crate) fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_prefix_becomes_dot() {
        assert_eq!(map_env_key("gemini_api_key"), "gemini.api_key");
        assert_eq!(
            map_env_key("assistant_system_prompt_file"),
            "assistant.system_prompt_file"
        );
        assert_eq!(map_env_key("ui_default_theme"), "ui.default_theme");
        assert_eq!(map_env_key("storage_wal_mode"), "storage.wal_mode");
    }

    #[test]
    fn uppercase_env_names_are_mapped() {
        assert_eq!(map_env_key("GEMINI_MODEL"), "gemini.model");
        assert_eq!(map_env_key("GEMINI_API_KEY"), "gemini.api_key");
        assert_eq!(map_env_key("UI_DEFAULT_THEME"), "ui.default_theme");
    }

    #[test]
    fn unknown_section_is_left_alone() {
        assert_eq!(map_env_key("telemetry_endpoint"), "telemetry_endpoint");
    }
}
