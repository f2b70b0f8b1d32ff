// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message classification: raw Telegram updates to [`UserAction`] values.
//!
//! Kept free of network calls so classification is testable with
//! JSON-built teloxide types.

use teloxide::types::{ChatKind, Message};
use teloxide::utils::command::BotCommands;

use taskgate_core::types::UserId;
use taskgate_flow::UserAction;

/// Bot commands the menu advertises.
#[derive(BotCommands, Debug, Clone, Copy, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Taskgate commands:")]
pub enum Command {
    #[command(description = "start working with the bot")]
    Start,
    #[command(description = "show available commands")]
    Help,
    #[command(description = "link this chat to your account")]
    Register,
    #[command(description = "abandon the current dialogue")]
    Reset,
    #[command(description = "list your open census tasks")]
    CensusTasks,
    #[command(description = "list your open debit tasks")]
    DebitTasks,
}

/// The bot only works in private chats; group noise is dropped.
pub fn is_private(msg: &Message) -> bool {
    matches!(msg.chat.kind, ChatKind::Private(_))
}

/// In a private chat the chat id doubles as the user id.
pub fn chat_user(msg: &Message) -> UserId {
    UserId(msg.chat.id.0)
}

/// Classifies a non-command private message into a [`UserAction`].
///
/// Contact shares drive registration; plain text feeds whatever dialogue
/// stage is waiting for it. Anything else (stickers, photos) is `None`.
pub fn classify(msg: &Message) -> Option<UserAction> {
    if let Some(contact) = msg.contact() {
        return Some(UserAction::ShareContact {
            phone: contact.phone_number.clone(),
        });
    }
    msg.text().map(|text| UserAction::Text(text.to_owned()))
}
