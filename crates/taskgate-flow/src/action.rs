// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound user actions and the callback payload grammar.
//!
//! The transport layer turns raw chat events into [`UserAction`] values.
//! Button presses arrive as opaque payload strings minted by this crate, so
//! parsing lives here next to the code that mints them.

use taskgate_core::error::TaskGateError;
use taskgate_core::types::TaskId;

use crate::calendar::{
    CalendarAction, CAL_NEXT_MONTH, CAL_NEXT_YEAR, CAL_NOOP, CAL_PREV_MONTH, CAL_PREV_YEAR,
};

/// Payload for the "no specific contact" option.
pub const CONTACT_NONE: &str = "-";

/// One inbound event from the chat transport, already classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// "Complete" pressed on a task card.
    StartCompletion(TaskId),
    /// "Forward" pressed on a task card.
    StartForwarding(TaskId),
    /// An action-type option was picked.
    PickActionType(String),
    /// A contact person was picked; `None` is the placeholder option.
    PickContact(Option<String>),
    /// A result option was picked.
    PickResult(i64),
    /// A forwarding recipient was picked.
    PickRecipient(String),
    /// A date-picker button was pressed.
    Calendar(CalendarAction),
    /// Free text; meaning depends on the dialogue stage.
    Text(String),
    /// The user shared their own contact card (phone number).
    ShareContact { phone: String },
    /// `/reset`: abandon any dialogue in progress.
    Reset,
}

/// Parses a callback payload into a [`UserAction`].
///
/// Unknown or malformed payloads are [`TaskGateError::MalformedUserInput`];
/// the separator is matched once from the left so task numbers and codes
/// containing `_` survive intact.
pub fn parse_callback(data: &str) -> Result<UserAction, TaskGateError> {
    if let Some(action) = parse_calendar(data) {
        return Ok(UserAction::Calendar(action));
    }

    let (prefix, rest) = data
        .split_once('_')
        .ok_or_else(|| malformed(data))?;
    if rest.is_empty() {
        return Err(malformed(data));
    }

    match prefix {
        "done" => Ok(UserAction::StartCompletion(TaskId(rest.to_owned()))),
        "forward" => Ok(UserAction::StartForwarding(TaskId(rest.to_owned()))),
        "type" => Ok(UserAction::PickActionType(rest.to_owned())),
        "contact" => Ok(UserAction::PickContact(if rest == CONTACT_NONE {
            None
        } else {
            Some(rest.to_owned())
        })),
        "result" => rest
            .parse::<i64>()
            .map(UserAction::PickResult)
            .map_err(|_| malformed(data)),
        "recipient" => Ok(UserAction::PickRecipient(rest.to_owned())),
        _ => Err(malformed(data)),
    }
}

fn parse_calendar(data: &str) -> Option<CalendarAction> {
    match data {
        CAL_PREV_YEAR => Some(CalendarAction::PrevYear),
        CAL_NEXT_YEAR => Some(CalendarAction::NextYear),
        CAL_PREV_MONTH => Some(CalendarAction::PrevMonth),
        CAL_NEXT_MONTH => Some(CalendarAction::NextMonth),
        CAL_NOOP => Some(CalendarAction::Noop),
        _ => data
            .strip_prefix("cal:day:")
            .and_then(|day| day.parse::<u32>().ok())
            .map(CalendarAction::SelectDay),
    }
}

fn malformed(data: &str) -> TaskGateError {
    TaskGateError::MalformedUserInput(format!("unrecognized callback payload {data:?}"))
}
