// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `taskgate serve` command implementation.
//!
//! Wires the HTTP task client, snapshot cache, session store, and dialogue
//! orchestrator together and hands them to the Telegram transport.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use taskgate_cache::TtlSnapshotCache;
use taskgate_config::model::TaskGateConfig;
use taskgate_config::{render_errors, validate_for_serve};
use taskgate_core::error::TaskGateError;
use taskgate_flow::{InMemorySessionStore, Orchestrator, RoutingRules};
use taskgate_remote::TaskApiClient;
use taskgate_telegram::TelegramBot;

pub async fn run(config: TaskGateConfig) -> Result<(), TaskGateError> {
    init_tracing(&config.agent.log_level);

    if let Err(errors) = validate_for_serve(&config) {
        render_errors(&errors);
        return Err(TaskGateError::Config(
            "configuration is not complete enough to serve".into(),
        ));
    }

    // validate_for_serve guarantees these are present.
    let base_url = config.remote.base_url.clone().ok_or_else(|| {
        TaskGateError::Config("remote.base_url is required".into())
    })?;
    let api_token = config.remote.api_token.clone().ok_or_else(|| {
        TaskGateError::Config("remote.api_token is required".into())
    })?;

    let remote = Arc::new(TaskApiClient::new(base_url, &api_token)?);
    let cache = Arc::new(TtlSnapshotCache::new(Duration::from_secs(
        config.cache.snapshot_ttl_secs,
    )));
    let sessions = Arc::new(InMemorySessionStore::new());
    let orchestrator = Arc::new(Orchestrator::new(
        remote,
        cache,
        sessions,
        RoutingRules {
            soft_collection_code: config.routing.soft_collection_code.clone(),
            hard_collection_code: config.routing.hard_collection_code.clone(),
            census_group: config.routing.census_group.clone(),
            debit_group: config.routing.debit_group.clone(),
            placeholder_comment_id: config.routing.placeholder_comment_id,
        },
    ));

    info!(
        snapshot_ttl_secs = config.cache.snapshot_ttl_secs,
        census_group = %config.routing.census_group,
        debit_group = %config.routing.debit_group,
        "starting taskgate"
    );

    let bot = TelegramBot::new(&config.telegram, orchestrator)?;
    bot.run().await
}

/// Initializes the tracing subscriber with the configured log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("taskgate={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
