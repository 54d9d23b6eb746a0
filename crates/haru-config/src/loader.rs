// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./haru.toml` > `~/.config/haru/haru.toml` >
//! `/etc/haru/haru.toml` with environment variable overrides via the
//! `HARU_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::HaruConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/haru/haru.toml` (system-wide)
/// 3. `~/.config/haru/haru.toml` (user XDG config)
/// 4. `./haru.toml` (local directory)
/// 5. `HARU_*` environment variables
pub fn load_config() -> Result<HaruConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HaruConfig::default()))
        .merge(Toml::file("/etc/haru/haru.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("haru/haru.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("haru.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<HaruConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HaruConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HaruConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HaruConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `HARU_ANTHROPIC_API_KEY` must map to
/// `anthropic.api_key`, not `anthropic.api.key`.
fn env_provider() -> Env {
    Env::prefixed("HARU_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: HARU_ANTHROPIC_API_KEY -> "anthropic_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("anthropic_", "anthropic.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("pipeline_", "pipeline.", 1)
            .replacen("cache_", "cache.", 1);
        mapped.into()
    })
}
