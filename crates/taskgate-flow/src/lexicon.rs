// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing text, kept in one place so the flows stay free of literals.

use taskgate_core::types::TaskSnapshot;

/// Fixed action-type catalogue: `(payload tag, display label)`.
pub const ACTION_TYPES: [(&str, &str); 3] = [
    ("call", "Phone call"),
    ("visit", "Site visit"),
    ("email", "Email"),
];

/// Display label for an action-type tag, if it is one of ours.
pub fn action_type_label(tag: &str) -> Option<&'static str> {
    ACTION_TYPES
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, label)| *label)
}

pub const START: &str = "Hello! I route your assigned tasks.\n\
    Share your contact with /register to link this chat to your account, \
    then use /census_tasks and /debit_tasks to list work assigned to you.";

pub const HELP: &str = "Commands:\n\
    /register - link this chat to your account (share your contact)\n\
    /census_tasks - list your open census tasks\n\
    /debit_tasks - list your open debit tasks\n\
    /reset - abandon the current dialogue\n\
    Task buttons start a completion or forwarding dialogue.";

pub const REGISTER_PROMPT: &str =
    "Tap the button below to share your contact and link this chat.";
pub const REGISTER_UNKNOWN_PHONE: &str =
    "No account matches that phone number. Contact your coordinator.";
pub const REGISTERED: &str = "Done. This chat is now linked to your account.";

pub const OPEN_CENSUS_FORM: &str = "Open census form";

pub const NOT_REGISTERED: &str =
    "This chat is not linked to an account yet. Use /register first.";
pub const NO_TASKS: &str = "No open tasks in this list.";

pub const PICK_ACTION_TYPE: &str = "What kind of action did you take?";
pub const PICK_CONTACT: &str = "Who did you talk to?";
pub const NO_CONTACT_ON_FILE: &str = "No contact on file";
pub const PICK_RESULT: &str = "What was the outcome?";
pub const PICK_CONTROL_DATE: &str = "Pick the follow-up date:";
pub const ASK_COMPLETION_COMMENT: &str = "Add a short comment on the work done:";

pub const PICK_RECIPIENT: &str = "Who should take this task over?";
pub const ASK_FORWARD_COMMENT: &str = "Add a comment for the new assignee:";

pub const RESET_DONE: &str = "Dialogue abandoned. The task is unchanged.";
pub const RESTART_REQUIRED: &str =
    "I lost track of this dialogue. Please start over from the task list.";
pub const RETRY_INPUT: &str = "I did not understand that. Please use the buttons.";
pub const GENERIC_FAILURE: &str =
    "Something went wrong and the task was not changed. Please try again later.";

pub fn completion_success(task_name: &str) -> String {
    format!("Task \"{task_name}\" is marked as done.")
}

pub fn forwarding_success(task_name: &str) -> String {
    format!("Task \"{task_name}\" was forwarded.")
}

/// One task card for the list views. Census author comments carry a
/// machine-readable URL suffix after the first `_`; only the text before it
/// is shown.
pub fn task_summary(snapshot: &TaskSnapshot, census: bool) -> String {
    let comment = if census {
        snapshot
            .author_comment
            .comment
            .split('_')
            .next()
            .unwrap_or_default()
    } else {
        snapshot.author_comment.comment.as_str()
    };
    format!(
        "{} | {}\nDeadline: {}\nFrom: {}\nPartner: {}\nBase: {}\n{}",
        snapshot.date_display(),
        snapshot.name,
        snapshot.deadline_display(),
        snapshot.author.name,
        snapshot.partner.name,
        snapshot.base.name,
        comment,
    )
}

/// The web-form URL embedded after the first `_` of a census author comment.
pub fn census_form_url(comment: &str) -> Option<&str> {
    comment
        .split('_')
        .nth(1)
        .map(str::trim)
        .filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_type_labels_resolve() {
        assert_eq!(action_type_label("call"), Some("Phone call"));
        assert_eq!(action_type_label("fax"), None);
    }

    fn snapshot(comment: &str) -> TaskSnapshot {
        serde_json::from_value(serde_json::json!({
            "number": "T-1",
            "name": "Overdue balance",
            "date": "2026-03-01T09:00:00Z",
            "deadline": "2026-03-05T18:00:00Z",
            "status": "New",
            "edited": false,
            "author": {"code": "A1", "name": "Alice"},
            "worker": {"code": "W1", "name": "Walter"},
            "partner": {"code": "P1", "name": "Partner LLC"},
            "base": {"number": "B1", "name": "North base", "group": "G1"},
            "author_comment": {"id": 1, "comment": comment},
            "worker_comment": {"id": 2, "comment": ""}
        }))
        .unwrap()
    }

    #[test]
    fn census_summary_hides_url_suffix() {
        let text = task_summary(&snapshot("visit site_http://example.com/form"), true);
        assert!(text.contains("visit site"));
        assert!(!text.contains("http://example.com/form"));
    }

    #[test]
    fn plain_summary_keeps_full_comment() {
        let text = task_summary(&snapshot("call before noon_if possible"), false);
        assert!(text.contains("call before noon_if possible"));
    }

    #[test]
    fn census_form_url_takes_the_embedded_half() {
        assert_eq!(
            census_form_url("visit site_http://example.com/form "),
            Some("http://example.com/form")
        );
        assert_eq!(census_form_url("no url here"), None);
        assert_eq!(census_form_url("dangling_"), None);
    }
}
