// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and non-zero retry budgets.

use haru_core::HaruError;

use crate::model::HaruConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<HaruError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HaruConfig) -> Result<(), Vec<HaruError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(HaruError::Config(
            "storage.database_path must not be empty".to_string(),
        ));
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(HaruError::Config(
            "gateway.host must not be empty".to_string(),
        ));
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(HaruError::Config(format!(
                "gateway.host `{host}` is not a valid IP address or hostname"
            )));
        }
    }

    if config.pipeline.max_attempts == 0 {
        errors.push(HaruError::Config(
            "pipeline.max_attempts must be at least 1".to_string(),
        ));
    }

    if config.cache.ttl_minutes == 0 {
        errors.push(HaruError::Config(
            "cache.ttl_minutes must be at least 1".to_string(),
        ));
    }

    if config.anthropic.max_tokens == 0 {
        errors.push(HaruError::Config(
            "anthropic.max_tokens must be at least 1".to_string(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
