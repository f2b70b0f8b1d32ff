// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Taskgate bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Taskgate configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; serving additionally requires the telegram and remote credentials.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TaskGateConfig {
    /// Process identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Remote workforce-management API settings.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Snapshot cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Escalation-routing constants.
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot process.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "taskgate".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required for serving.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Chat id that receives operator alerts (data-integrity errors).
    /// `None` disables operator alerting.
    #[serde(default)]
    pub admin_chat_id: Option<i64>,
}

/// Remote workforce-management API configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Base URL of the task API, with trailing slash. Required for serving.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Opaque bearer token passed as `Authorization: Token <value>`.
    /// Required for serving.
    #[serde(default)]
    pub api_token: Option<String>,
}

/// Snapshot cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Snapshot time-to-live in seconds.
    #[serde(default = "default_snapshot_ttl_secs")]
    pub snapshot_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            snapshot_ttl_secs: default_snapshot_ttl_secs(),
        }
    }
}

fn default_snapshot_ttl_secs() -> u64 {
    180
}

/// Constants the escalation and forwarding logic keys on.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Sentinel author code for soft-collection tasks.
    #[serde(default = "default_soft_collection_code")]
    pub soft_collection_code: String,

    /// Sentinel author code for hard-collection tasks (not forwardable).
    #[serde(default = "default_hard_collection_code")]
    pub hard_collection_code: String,

    /// Task group whose author comments embed a follow-up URL after `_`.
    #[serde(default = "default_census_group")]
    pub census_group: String,

    /// Task group for debit-control task listings.
    #[serde(default = "default_debit_group")]
    pub debit_group: String,

    /// Worker-comment id written into a freshly forwarded task.
    #[serde(default = "default_placeholder_comment_id")]
    pub placeholder_comment_id: i64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            soft_collection_code: default_soft_collection_code(),
            hard_collection_code: default_hard_collection_code(),
            census_group: default_census_group(),
            debit_group: default_debit_group(),
            placeholder_comment_id: default_placeholder_comment_id(),
        }
    }
}

fn default_soft_collection_code() -> String {
    "SoftCollect".to_string()
}

fn default_hard_collection_code() -> String {
    "HardCollect".to_string()
}

fn default_census_group() -> String {
    "000000004".to_string()
}

fn default_debit_group() -> String {
    "000000002".to_string()
}

fn default_placeholder_comment_id() -> i64 {
    2
}
