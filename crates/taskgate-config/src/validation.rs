// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Collects every violation instead of failing fast so an
//! operator sees the whole list at once.

use thiserror::Error;

use crate::model::TaskGateConfig;

/// A single configuration problem, reported at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] figment::Error),

    #[error("invalid config: {message}")]
    Validation { message: String },
}

/// Validate semantic constraints that hold for any invocation.
pub fn validate_config(config: &TaskGateConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.cache.snapshot_ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "cache.snapshot_ttl_secs must be greater than zero".to_string(),
        });
    }

    for (field, value) in [
        ("routing.soft_collection_code", &config.routing.soft_collection_code),
        ("routing.hard_collection_code", &config.routing.hard_collection_code),
        ("routing.census_group", &config.routing.census_group),
        ("routing.debit_group", &config.routing.debit_group),
    ] {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{field} must not be empty"),
            });
        }
    }

    if let Some(url) = config.remote.base_url.as_deref() {
        if !url.ends_with('/') {
            errors.push(ConfigError::Validation {
                message: format!("remote.base_url must end with a trailing slash, got `{url}`"),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate the additional fields serving requires: credentials for the
/// chat transport and the remote API.
pub fn validate_for_serve(config: &TaskGateConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config
        .telegram
        .bot_token
        .as_deref()
        .unwrap_or_default()
        .is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "telegram.bot_token is required to serve".to_string(),
        });
    }

    if config.remote.base_url.as_deref().unwrap_or_default().is_empty() {
        errors.push(ConfigError::Validation {
            message: "remote.base_url is required to serve".to_string(),
        });
    }

    if config
        .remote
        .api_token
        .as_deref()
        .unwrap_or_default()
        .is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "remote.api_token is required to serve".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Print collected configuration errors to stderr, one per line.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("taskgate: {error}");
    }
}
