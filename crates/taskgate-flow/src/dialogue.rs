// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user dialogue state and its storage.
//!
//! A user is either in no flow, or in exactly one completion or forwarding
//! dialogue tied to one task. Stage transitions only ever add fields; a
//! field expected by a later stage that is absent means the state was lost
//! or corrupted and the flow must restart.

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;

use taskgate_core::types::{TaskId, UserId};

use crate::calendar::CalendarView;

/// Where a completion dialogue currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStage {
    AwaitingActionType,
    AwaitingContact,
    AwaitingResult,
    AwaitingControlDate(CalendarView),
    AwaitingComment,
}

/// Where a forwarding dialogue currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardingStage {
    AwaitingRecipient,
    AwaitingComment,
}

/// Which flow the user is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveFlow {
    Completion(CompletionStage),
    Forwarding(ForwardingStage),
}

/// The contact person chosen during completion. `code` is `None` when the
/// partner had nobody on file and the placeholder option was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactChoice {
    pub code: Option<String>,
}

/// Everything gathered so far in one dialogue.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueState {
    pub task: TaskId,
    pub flow: ActiveFlow,
    pub action_type: Option<String>,
    pub contact: Option<ContactChoice>,
    pub result_name: Option<String>,
    pub control_date: Option<NaiveDate>,
    pub recipient: Option<String>,
}

impl DialogueState {
    /// Fresh completion dialogue at its first stage.
    pub fn completion(task: TaskId) -> Self {
        Self::new(task, ActiveFlow::Completion(CompletionStage::AwaitingActionType))
    }

    /// Fresh forwarding dialogue at its first stage.
    pub fn forwarding(task: TaskId) -> Self {
        Self::new(task, ActiveFlow::Forwarding(ForwardingStage::AwaitingRecipient))
    }

    fn new(task: TaskId, flow: ActiveFlow) -> Self {
        Self {
            task,
            flow,
            action_type: None,
            contact: None,
            result_name: None,
            control_date: None,
            recipient: None,
        }
    }
}

/// Storage for in-flight dialogues, keyed by chat user.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, user: &UserId) -> Option<DialogueState>;
    async fn store(&self, user: &UserId, state: DialogueState);
    async fn clear(&self, user: &UserId);
}

/// Process-local session store. State does not survive a restart, which is
/// acceptable: a lost dialogue restarts from the task card.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<UserId, DialogueState>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, user: &UserId) -> Option<DialogueState> {
        self.sessions.get(user).map(|s| s.clone())
    }

    async fn store(&self, user: &UserId, state: DialogueState) {
        self.sessions.insert(*user, state);
    }

    async fn clear(&self, user: &UserId) {
        self.sessions.remove(user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_load_clear_round_trip() {
        let store = InMemorySessionStore::new();
        let user = UserId(7);
        assert!(store.load(&user).await.is_none());

        let state = DialogueState::completion(TaskId("T-1".into()));
        store.store(&user, state.clone()).await;
        assert_eq!(store.load(&user).await, Some(state));

        store.clear(&user).await;
        assert!(store.load(&user).await.is_none());
    }

    #[tokio::test]
    async fn users_do_not_share_state() {
        let store = InMemorySessionStore::new();
        store
            .store(&UserId(1), DialogueState::forwarding(TaskId("T-1".into())))
            .await;
        assert!(store.load(&UserId(2)).await.is_none());
    }

    #[test]
    fn fresh_dialogues_start_at_the_first_stage() {
        let done = DialogueState::completion(TaskId("T-1".into()));
        assert_eq!(
            done.flow,
            ActiveFlow::Completion(CompletionStage::AwaitingActionType)
        );
        assert!(done.action_type.is_none());

        let fwd = DialogueState::forwarding(TaskId("T-1".into()));
        assert_eq!(
            fwd.flow,
            ActiveFlow::Forwarding(ForwardingStage::AwaitingRecipient)
        );
        assert!(fwd.recipient.is_none());
    }
}
