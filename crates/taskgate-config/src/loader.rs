// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./taskgate.toml` > `~/.config/taskgate/taskgate.toml`
//! > `/etc/taskgate/taskgate.toml` with environment variable overrides via
//! the `TASKGATE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TaskGateConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/taskgate/taskgate.toml` (system-wide)
/// 3. `~/.config/taskgate/taskgate.toml` (user XDG config)
/// 4. `./taskgate.toml` (local directory)
/// 5. `TASKGATE_*` environment variables
pub fn load_config() -> Result<TaskGateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TaskGateConfig::default()))
        .merge(Toml::file("/etc/taskgate/taskgate.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("taskgate/taskgate.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("taskgate.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and for callers that already hold the TOML text.
pub fn load_config_from_str(toml_content: &str) -> Result<TaskGateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TaskGateConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TaskGateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TaskGateConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TASKGATE_TELEGRAM_BOT_TOKEN` must map
/// to `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("TASKGATE_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("remote_", "remote.", 1)
            .replacen("cache_", "cache.", 1)
            .replacen("routing_", "routing.", 1);
        mapped.into()
    })
}
