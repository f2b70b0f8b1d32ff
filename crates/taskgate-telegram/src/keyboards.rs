// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyboard rendering: abstract choice grids to Telegram markup.

use teloxide::types::{
    ButtonRequest, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
};
use url::Url;
use tracing::warn;

use taskgate_flow::{Choice, ChoiceAction};

/// Renders a choice grid as an inline keyboard, one button per choice,
/// preserving the row layout. A link choice whose URL does not parse is
/// dropped from the row rather than failing the whole message.
pub fn inline_keyboard(options: &[Vec<Choice>]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(options.iter().map(|row| {
        row.iter()
            .filter_map(|choice| match &choice.action {
                ChoiceAction::Callback(payload) => Some(InlineKeyboardButton::callback(
                    choice.label.clone(),
                    payload.clone(),
                )),
                ChoiceAction::Link(link) => match Url::parse(link) {
                    Ok(url) => Some(InlineKeyboardButton::url(choice.label.clone(), url)),
                    Err(error) => {
                        warn!(link, %error, "dropping link button with unparseable url");
                        None
                    }
                },
            })
            .collect::<Vec<_>>()
    }))
}

/// One-shot reply keyboard asking the user to share their own contact.
pub fn contact_request_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new([[
        KeyboardButton::new("Share my contact").request(ButtonRequest::Contact)
    ]])
    .resize_keyboard()
    .one_time_keyboard()
}
