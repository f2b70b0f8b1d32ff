// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram transport for the Taskgate bot.
//!
//! Long-polls the Bot API via teloxide, classifies updates into
//! [`UserAction`] values, hands them to the orchestrator, and renders its
//! [`Outcome`]s back as messages and inline keyboards. Operator alerts go to
//! the configured admin chat; superseded prompts are deleted best-effort.

pub mod handler;
pub mod keyboards;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::MaybeInaccessibleMessage;
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

use taskgate_config::model::TelegramConfig;
use taskgate_core::error::TaskGateError;
use taskgate_core::types::UserId;
use taskgate_flow::orchestrator::TaskGroup;
use taskgate_flow::{lexicon, parse_callback, Orchestrator, Outcome, Reply, UserAction};

use handler::Command;

/// Where operator alerts are routed, if anywhere.
#[derive(Debug, Clone, Copy)]
struct AlertSink {
    admin_chat_id: Option<i64>,
}

/// The running Telegram front-end.
pub struct TelegramBot {
    bot: Bot,
    orchestrator: Arc<Orchestrator>,
    alerts: AlertSink,
}

impl TelegramBot {
    /// Builds the bot from configuration. Requires `telegram.bot_token`.
    pub fn new(
        config: &TelegramConfig,
        orchestrator: Arc<Orchestrator>,
    ) -> Result<Self, TaskGateError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            TaskGateError::Config("telegram.bot_token is required to serve".into())
        })?;
        if token.is_empty() {
            return Err(TaskGateError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        Ok(Self {
            bot: Bot::new(token),
            orchestrator,
            alerts: AlertSink {
                admin_chat_id: config.admin_chat_id,
            },
        })
    }

    /// Registers the command menu and long-polls until shutdown.
    pub async fn run(self) -> Result<(), TaskGateError> {
        self.bot
            .set_my_commands(Command::bot_commands())
            .await
            .map_err(|e| TaskGateError::Channel {
                message: format!("failed to register command menu: {e}"),
                source: Some(Box::new(e)),
            })?;

        info!("starting Telegram long polling");

        let dispatcher_tree = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(on_command),
            )
            .branch(Update::filter_message().endpoint(on_message))
            .branch(Update::filter_callback_query().endpoint(on_callback));

        Dispatcher::builder(self.bot, dispatcher_tree)
            .dependencies(dptree::deps![self.orchestrator, self.alerts])
            .default_handler(|_| async {})
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}

async fn on_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    orchestrator: Arc<Orchestrator>,
    alerts: AlertSink,
) -> ResponseResult<()> {
    if !handler::is_private(&msg) {
        debug!(chat_id = msg.chat.id.0, "ignoring non-private command");
        return respond(());
    }
    let user = handler::chat_user(&msg);

    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, lexicon::START).await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, lexicon::HELP).await?;
        }
        Command::Register => {
            bot.send_message(msg.chat.id, lexicon::REGISTER_PROMPT)
                .reply_markup(keyboards::contact_request_keyboard())
                .await?;
        }
        Command::Reset => {
            let outcome = orchestrator.handle(user, UserAction::Reset).await;
            deliver(&bot, msg.chat.id, outcome, alerts).await?;
        }
        Command::CensusTasks => {
            let outcome = orchestrator.list_tasks(user, TaskGroup::Census).await;
            deliver(&bot, msg.chat.id, outcome, alerts).await?;
        }
        Command::DebitTasks => {
            let outcome = orchestrator.list_tasks(user, TaskGroup::Debit).await;
            deliver(&bot, msg.chat.id, outcome, alerts).await?;
        }
    }
    respond(())
}

async fn on_message(
    bot: Bot,
    msg: Message,
    orchestrator: Arc<Orchestrator>,
    alerts: AlertSink,
) -> ResponseResult<()> {
    if !handler::is_private(&msg) {
        debug!(chat_id = msg.chat.id.0, "ignoring non-private message");
        return respond(());
    }
    let Some(action) = handler::classify(&msg) else {
        debug!(msg_id = msg.id.0, "ignoring unsupported message type");
        return respond(());
    };

    let user = handler::chat_user(&msg);
    let outcome = orchestrator.handle(user, action).await;
    deliver(&bot, msg.chat.id, outcome, alerts).await?;
    respond(())
}

async fn on_callback(
    bot: Bot,
    query: CallbackQuery,
    orchestrator: Arc<Orchestrator>,
    alerts: AlertSink,
) -> ResponseResult<()> {
    bot.answer_callback_query(query.id.clone()).await?;

    let chat_id = match &query.message {
        Some(message) => message.chat().id,
        None => ChatId(query.from.id.0 as i64),
    };
    let user = UserId(chat_id.0);

    let outcome = match query.data.as_deref().map(parse_callback) {
        Some(Ok(action)) => orchestrator.handle(user, action).await,
        Some(Err(err)) => {
            warn!(user = %user, error = %err, "unparseable callback payload");
            Outcome::text(lexicon::RETRY_INPUT)
        }
        None => return respond(()),
    };

    // The pressed prompt is superseded; drop it so old keyboards cannot be
    // replayed. Failure is non-fatal.
    if let Some(MaybeInaccessibleMessage::Regular(message)) = &query.message {
        if let Err(err) = bot.delete_message(chat_id, message.id).await {
            warn!(chat_id = chat_id.0, error = %err, "could not delete prompt");
        }
    }

    deliver(&bot, chat_id, outcome, alerts).await?;
    respond(())
}

/// Sends every reply in order, then routes the operator alert if one is set.
async fn deliver(
    bot: &Bot,
    chat_id: ChatId,
    outcome: Outcome,
    alerts: AlertSink,
) -> ResponseResult<()> {
    for reply in outcome.replies {
        match reply {
            Reply::Text(text) => {
                bot.send_message(chat_id, text).await?;
            }
            Reply::Choices { text, options } => {
                bot.send_message(chat_id, text)
                    .reply_markup(keyboards::inline_keyboard(&options))
                    .await?;
            }
        }
    }

    if let Some(alert) = outcome.operator_alert {
        match alerts.admin_chat_id {
            Some(admin) => {
                if let Err(err) = bot.send_message(ChatId(admin), &alert).await {
                    warn!(error = %err, alert, "could not deliver operator alert");
                }
            }
            None => warn!(alert, "operator alert dropped, no admin chat configured"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn telegram_config(token: Option<&str>) -> TelegramConfig {
        serde_json::from_value(serde_json::json!({
            "bot_token": token,
        }))
        .unwrap()
    }

    fn orchestrator() -> Arc<Orchestrator> {
        use std::time::Duration;
        use taskgate_flow::{InMemorySessionStore, RoutingRules};

        Arc::new(Orchestrator::new(
            Arc::new(taskgate_test_utils::MockRemote::new()),
            Arc::new(taskgate_cache::TtlSnapshotCache::new(Duration::from_secs(1))),
            Arc::new(InMemorySessionStore::new()),
            RoutingRules {
                soft_collection_code: "SoftCollect".into(),
                hard_collection_code: "HardCollect".into(),
                census_group: "000000004".into(),
                debit_group: "000000002".into(),
                placeholder_comment_id: 2,
            },
        ))
    }

    #[test]
    fn new_requires_bot_token() {
        assert!(TelegramBot::new(&telegram_config(None), orchestrator()).is_err());
    }

    #[test]
    fn new_rejects_empty_token() {
        assert!(TelegramBot::new(&telegram_config(Some("")), orchestrator()).is_err());
    }

    #[test]
    fn new_accepts_valid_token() {
        let config = telegram_config(Some("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11"));
        assert!(TelegramBot::new(&config, orchestrator()).is_ok());
    }
}
