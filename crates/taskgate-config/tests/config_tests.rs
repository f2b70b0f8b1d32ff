// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Taskgate configuration system.

use taskgate_config::{load_and_validate_str, load_config_from_str, validate_for_serve};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[agent]
name = "test-bot"
log_level = "debug"

[telegram]
bot_token = "123:ABC"
admin_chat_id = 42

[remote]
base_url = "https://tasks.example.com/api/v1/"
api_token = "opaque-token"

[cache]
snapshot_ttl_secs = 60

[routing]
soft_collection_code = "SoftCollect"
census_group = "000000004"
debit_group = "000000002"
placeholder_comment_id = 7
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "test-bot");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123:ABC"));
    assert_eq!(config.telegram.admin_chat_id, Some(42));
    assert_eq!(
        config.remote.base_url.as_deref(),
        Some("https://tasks.example.com/api/v1/")
    );
    assert_eq!(config.remote.api_token.as_deref(), Some("opaque-token"));
    assert_eq!(config.cache.snapshot_ttl_secs, 60);
    assert_eq!(config.routing.placeholder_comment_id, 7);
}

/// Defaults load without any config file and pass general validation.
#[test]
fn defaults_are_valid() {
    let config = load_and_validate_str("").expect("defaults should be valid");
    assert_eq!(config.agent.name, "taskgate");
    assert_eq!(config.cache.snapshot_ttl_secs, 180);
    assert_eq!(config.routing.soft_collection_code, "SoftCollect");
    assert_eq!(config.routing.hard_collection_code, "HardCollect");
    assert_eq!(config.routing.census_group, "000000004");
    assert_eq!(config.routing.debit_group, "000000002");
    assert_eq!(config.routing.placeholder_comment_id, 2);
    assert!(config.telegram.bot_token.is_none());
}

/// Unknown keys are rejected by deny_unknown_fields.
#[test]
fn unknown_field_is_rejected() {
    let toml = r#"
[telegram]
bot_tken = "abc"
"#;
    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("bot_tken"),
        "error should mention the bad key, got: {err_str}"
    );
}

/// Serving requires the telegram token and the remote credentials; all
/// missing fields are reported at once.
#[test]
fn serve_validation_reports_all_missing_credentials() {
    let config = load_and_validate_str("").expect("defaults parse");
    let errors = validate_for_serve(&config).expect_err("serving needs credentials");
    let rendered: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(rendered.len(), 3, "got: {rendered:?}");
    assert!(rendered.iter().any(|m| m.contains("telegram.bot_token")));
    assert!(rendered.iter().any(|m| m.contains("remote.base_url")));
    assert!(rendered.iter().any(|m| m.contains("remote.api_token")));
}

/// Zero TTL is a semantic error.
#[test]
fn zero_snapshot_ttl_is_rejected() {
    let toml = r#"
[cache]
snapshot_ttl_secs = 0
"#;
    let errors = load_and_validate_str(toml).expect_err("zero TTL invalid");
    assert!(errors
        .iter()
        .any(|e| e.to_string().contains("snapshot_ttl_secs")));
}

/// Base URL must end with a trailing slash so path joins stay predictable.
#[test]
fn base_url_without_trailing_slash_is_rejected() {
    let toml = r#"
[remote]
base_url = "https://tasks.example.com/api/v1"
api_token = "t"
"#;
    let errors = load_and_validate_str(toml).expect_err("missing slash invalid");
    assert!(errors.iter().any(|e| e.to_string().contains("trailing slash")));
}
