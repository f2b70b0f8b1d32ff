// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Abstract outbound effects emitted by the flows.
//!
//! The orchestrator never talks to the chat transport directly; it emits
//! [`Reply`] values ("present options", "send text") that the transport
//! renders however it likes.

/// What pressing a choice does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceAction {
    /// Opaque payload the transport echoes back on selection.
    Callback(String),
    /// External link the chat client opens; nothing comes back to the bot.
    Link(String),
}

/// One button: display label plus its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub action: ChoiceAction,
}

impl Choice {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ChoiceAction::Callback(payload.into()),
        }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ChoiceAction::Link(url.into()),
        }
    }

    /// Callback payload, `None` for link buttons.
    pub fn payload(&self) -> Option<&str> {
        match &self.action {
            ChoiceAction::Callback(payload) => Some(payload),
            ChoiceAction::Link(_) => None,
        }
    }
}

/// An outbound message: plain text, or text with a choice keyboard laid out
/// in rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Choices {
        text: String,
        options: Vec<Vec<Choice>>,
    },
}

/// The result of handling one inbound user action.
///
/// `operator_alert` carries a data-integrity message for the admin channel;
/// it never reaches the end user.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub replies: Vec<Reply>,
    pub operator_alert: Option<String>,
}

impl Outcome {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            replies: vec![Reply::Text(text.into())],
            operator_alert: None,
        }
    }

    pub fn choices(text: impl Into<String>, options: Vec<Vec<Choice>>) -> Self {
        Self {
            replies: vec![Reply::Choices {
                text: text.into(),
                options,
            }],
            operator_alert: None,
        }
    }

    pub fn with_alert(mut self, alert: impl Into<String>) -> Self {
        self.operator_alert = Some(alert.into());
        self
    }
}

/// Lays out choices one per row, the keyboard shape used for every
/// candidate and option list.
pub fn single_column(choices: Vec<Choice>) -> Vec<Vec<Choice>> {
    choices.into_iter().map(|c| vec![c]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_column_wraps_each_choice() {
        let rows = single_column(vec![Choice::new("a", "pa"), Choice::new("b", "pb")]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1][0].payload(), Some("pb"));
    }

    #[test]
    fn link_choices_have_no_payload() {
        let choice = Choice::link("Open form", "http://example.com/form");
        assert_eq!(choice.payload(), None);
        assert_eq!(
            choice.action,
            ChoiceAction::Link("http://example.com/form".into())
        );
    }

    #[test]
    fn outcome_with_alert_keeps_replies() {
        let outcome = Outcome::text("done").with_alert("integrity problem");
        assert_eq!(outcome.replies.len(), 1);
        assert_eq!(outcome.operator_alert.as_deref(), Some("integrity problem"));
    }
}
