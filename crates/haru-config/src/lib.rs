// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Haru service.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides.
//!
//! # Usage
//!
//! ```no_run
//! use haru_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("service name: {}", config.agent.name);
//! ```

pub mod loader;
pub mod model;
pub mod validation;

use haru_core::HaruError;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::HaruConfig;
pub use validation::validate_config;

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<HaruConfig, Vec<HaruError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![HaruError::Config(err.to_string())]),
    }
}

/// Load configuration from a specific TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<HaruConfig, Vec<HaruError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![HaruError::Config(err.to_string())]),
    }
}
