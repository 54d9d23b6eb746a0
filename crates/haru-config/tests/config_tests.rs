// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for configuration loading, merging, and validation.

use haru_config::{load_and_validate_str, load_config_from_str, HaruConfig};
use serial_test::serial;

#[test]
fn defaults_apply_with_empty_config() {
    let config = load_config_from_str("").unwrap();
    assert_eq!(config.agent.name, "haru");
    assert_eq!(config.agent.log_level, "info");
    assert_eq!(config.anthropic.default_model, "claude-sonnet-4-20250514");
    assert_eq!(config.anthropic.max_tokens, 4096);
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert_eq!(config.gateway.port, 8026);
    assert_eq!(config.pipeline.max_attempts, 3);
    assert_eq!(config.cache.ttl_minutes, 5);
    assert!(config.storage.wal_mode);
}

#[test]
fn toml_values_override_defaults() {
    let toml = r#"
[agent]
name = "haru-dev"
log_level = "debug"

[gateway]
port = 9000

[pipeline]
max_attempts = 2

[storage]
database_path = "/tmp/haru-dev.db"
"#;
    let config = load_config_from_str(toml).unwrap();
    assert_eq!(config.agent.name, "haru-dev");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.gateway.port, 9000);
    assert_eq!(config.pipeline.max_attempts, 2);
    assert_eq!(config.storage.database_path, "/tmp/haru-dev.db");
    // Untouched sections keep defaults.
    assert_eq!(config.anthropic.max_tokens, 4096);
}

#[test]
fn unknown_keys_are_rejected() {
    let toml = r#"
[agent]
name = "haru"
unknown_field = true
"#;
    assert!(load_config_from_str(toml).is_err());
}

#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[telemetry]
enabled = true
"#;
    assert!(load_config_from_str(toml).is_err());
}

#[test]
fn bearer_token_defaults_to_none() {
    let config = load_config_from_str("").unwrap();
    assert!(config.gateway.bearer_token.is_none());

    let toml = r#"
[gateway]
bearer_token = "secret"
"#;
    let config = load_config_from_str(toml).unwrap();
    assert_eq!(config.gateway.bearer_token.as_deref(), Some("secret"));
}

#[test]
fn validation_rejects_zero_attempts() {
    let toml = r#"
[pipeline]
max_attempts = 0
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors.iter().any(|e| e.to_string().contains("max_attempts")));
}

#[test]
#[serial]
fn env_var_overrides_toml() {
    // SAFETY: test is serialized; no other thread touches the environment.
    unsafe {
        std::env::set_var("HARU_GATEWAY_PORT", "9999");
        std::env::set_var("HARU_ANTHROPIC_API_KEY", "sk-test-key");
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("haru.toml");
    std::fs::write(&path, "[gateway]\nport = 8000\n").unwrap();

    let config = haru_config::load_config_from_path(&path).unwrap();
    assert_eq!(config.gateway.port, 9999);
    assert_eq!(config.anthropic.api_key.as_deref(), Some("sk-test-key"));

    unsafe {
        std::env::remove_var("HARU_GATEWAY_PORT");
        std::env::remove_var("HARU_ANTHROPIC_API_KEY");
    }
}

#[test]
#[serial]
fn env_mapping_preserves_underscored_keys() {
    // HARU_STORAGE_DATABASE_PATH must map to storage.database_path,
    // not storage.database.path.
    unsafe {
        std::env::set_var("HARU_STORAGE_DATABASE_PATH", "/tmp/env-haru.db");
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("haru.toml");
    std::fs::write(&path, "").unwrap();

    let config = haru_config::load_config_from_path(&path).unwrap();
    assert_eq!(config.storage.database_path, "/tmp/env-haru.db");

    unsafe {
        std::env::remove_var("HARU_STORAGE_DATABASE_PATH");
    }
}

#[test]
fn config_is_serializable_back_to_toml() {
    let config = HaruConfig::default();
    let rendered = toml::to_string(&config).unwrap();
    let reparsed = load_config_from_str(&rendered).unwrap();
    assert_eq!(reparsed.agent.name, config.agent.name);
    assert_eq!(reparsed.gateway.port, config.gateway.port);
}
