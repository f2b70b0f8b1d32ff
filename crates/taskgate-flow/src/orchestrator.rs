// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task command orchestrator.
//!
//! One entry point, [`Orchestrator::handle`], routes every inbound action to
//! the right dialogue step and maps every internal failure to exactly one
//! terminal user message. Detail (status codes, response bodies) goes to
//! tracing, never to the chat.

use std::sync::Arc;

use tracing::{error, info, warn};

use taskgate_core::error::TaskGateError;
use taskgate_core::traits::{RemoteTasks, SnapshotCache};
use taskgate_core::types::{TaskId, TaskSnapshot, UserId};

use crate::action::UserAction;
use crate::dialogue::{ActiveFlow, CompletionStage, ForwardingStage, SessionStore};
use crate::lexicon;
use crate::reply::{Choice, Outcome, Reply};

/// Routing constants lifted from configuration.
#[derive(Debug, Clone)]
pub struct RoutingRules {
    /// Sentinel author code marking robot-injected soft-collection tasks.
    pub soft_collection_code: String,
    /// Sentinel author code for hard-collection tasks; those must stay with
    /// the assigned worker and cannot be forwarded.
    pub hard_collection_code: String,
    /// Base group whose author comments carry a `_<url>` suffix.
    pub census_group: String,
    pub debit_group: String,
    /// Pre-existing comment id used as the worker-comment slot on forward.
    pub placeholder_comment_id: i64,
}

/// The two task lists the bot exposes as commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskGroup {
    Census,
    Debit,
}

pub struct Orchestrator {
    pub(crate) remote: Arc<dyn RemoteTasks>,
    pub(crate) cache: Arc<dyn SnapshotCache>,
    pub(crate) sessions: Arc<dyn SessionStore>,
    pub(crate) rules: RoutingRules,
}

impl Orchestrator {
    pub fn new(
        remote: Arc<dyn RemoteTasks>,
        cache: Arc<dyn SnapshotCache>,
        sessions: Arc<dyn SessionStore>,
        rules: RoutingRules,
    ) -> Self {
        Self {
            remote,
            cache,
            sessions,
            rules,
        }
    }

    /// Handles one inbound action for one user.
    ///
    /// Never returns an error: every failure is folded into a terminal
    /// [`Outcome`] so the transport always has something to say.
    pub async fn handle(&self, user: UserId, action: UserAction) -> Outcome {
        match self.dispatch(user, action).await {
            Ok(outcome) => outcome,
            Err(err) => self.failure_outcome(user, err).await,
        }
    }

    async fn dispatch(
        &self,
        user: UserId,
        action: UserAction,
    ) -> Result<Outcome, TaskGateError> {
        match action {
            UserAction::Reset => {
                self.sessions.clear(&user).await;
                info!(user = %user, "dialogue reset");
                Ok(Outcome::text(lexicon::RESET_DONE))
            }
            UserAction::StartCompletion(task) => self.start_completion(user, task).await,
            UserAction::StartForwarding(task) => self.start_forwarding(user, task).await,
            UserAction::ShareContact { phone } => self.register(user, &phone).await,
            staged => self.dispatch_staged(user, staged).await,
        }
    }

    /// Routes actions that only make sense inside a dialogue.
    async fn dispatch_staged(
        &self,
        user: UserId,
        action: UserAction,
    ) -> Result<Outcome, TaskGateError> {
        let Some(state) = self.sessions.load(&user).await else {
            // Stray free text outside any dialogue is just noise.
            if matches!(action, UserAction::Text(_)) {
                return Ok(Outcome::text(lexicon::RETRY_INPUT));
            }
            return Err(TaskGateError::MissingPrerequisiteState(
                "button pressed with no dialogue in progress".to_owned(),
            ));
        };

        match (state.flow, action) {
            (
                ActiveFlow::Completion(CompletionStage::AwaitingActionType),
                UserAction::PickActionType(tag),
            ) => self.pick_action_type(user, state, &tag).await,
            (
                ActiveFlow::Completion(CompletionStage::AwaitingContact),
                UserAction::PickContact(code),
            ) => self.pick_contact(user, state, code).await,
            (
                ActiveFlow::Completion(CompletionStage::AwaitingResult),
                UserAction::PickResult(id),
            ) => self.pick_result(user, state, id).await,
            (
                ActiveFlow::Completion(CompletionStage::AwaitingControlDate(view)),
                UserAction::Calendar(cal),
            ) => self.pick_control_date(user, state, view, cal).await,
            (
                ActiveFlow::Completion(CompletionStage::AwaitingComment),
                UserAction::Text(text),
            ) => self.commit_completion(user, state, &text).await,
            (
                ActiveFlow::Forwarding(ForwardingStage::AwaitingRecipient),
                UserAction::PickRecipient(code),
            ) => self.pick_recipient(user, state, code).await,
            (
                ActiveFlow::Forwarding(ForwardingStage::AwaitingComment),
                UserAction::Text(text),
            ) => self.commit_forwarding(user, state, &text).await,
            (flow, action) => Err(TaskGateError::MissingPrerequisiteState(format!(
                "action {action:?} does not match dialogue stage {flow:?}"
            ))),
        }
    }

    /// Cache-first snapshot retrieval: at most one remote fetch per call,
    /// never a retry loop.
    pub(crate) async fn load_snapshot(
        &self,
        id: &TaskId,
    ) -> Result<TaskSnapshot, TaskGateError> {
        if let Some(snapshot) = self.cache.get(id).await {
            return Ok(snapshot);
        }
        let snapshot = self.remote.get_task(id).await?;
        self.cache.put(&snapshot).await;
        Ok(snapshot)
    }

    /// Links a chat to a worker account by phone number.
    pub(crate) async fn register(
        &self,
        user: UserId,
        phone: &str,
    ) -> Result<Outcome, TaskGateError> {
        let normalized: String = phone
            .chars()
            .filter(|c| !matches!(c, '+' | '-' | '(' | ')' | ' '))
            .collect();
        let Some(mut worker) = self.remote.get_worker_by_phone(&normalized).await? else {
            warn!(user = %user, "registration attempt for unknown phone");
            return Ok(Outcome::text(lexicon::REGISTER_UNKNOWN_PHONE));
        };
        worker.chat_id = Some(user.to_string());
        self.remote.put_worker(&worker).await?;
        info!(user = %user, worker = %worker.code, "chat registered");
        Ok(Outcome::text(lexicon::REGISTERED))
    }

    /// Lists this user's open tasks in the given group as actionable cards.
    pub async fn list_tasks(&self, user: UserId, group: TaskGroup) -> Outcome {
        match self.try_list_tasks(user, group).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(user = %user, error = %err, "task listing failed");
                Outcome::text(lexicon::GENERIC_FAILURE)
            }
        }
    }

    async fn try_list_tasks(
        &self,
        user: UserId,
        group: TaskGroup,
    ) -> Result<Outcome, TaskGateError> {
        let group_key = match group {
            TaskGroup::Census => &self.rules.census_group,
            TaskGroup::Debit => &self.rules.debit_group,
        };
        let Some(worker) = self.remote.get_worker_by_chat(&user.to_string()).await? else {
            return Ok(Outcome::text(lexicon::NOT_REGISTERED));
        };
        let tasks = self.remote.list_new_tasks(&worker.code, group_key).await?;
        if tasks.is_empty() {
            return Ok(Outcome::text(lexicon::NO_TASKS));
        }
        let census = group == TaskGroup::Census;
        let replies = tasks
            .iter()
            .map(|snapshot| Reply::Choices {
                text: lexicon::task_summary(snapshot, census),
                options: self.task_card_options(snapshot, census),
            })
            .collect();
        Ok(Outcome {
            replies,
            operator_alert: None,
        })
    }

    /// Buttons for one task card. Census tasks are completed on the web form
    /// linked in their author comment, so the card links the form and offers
    /// forwarding only. Hard-collection tasks offer completion only.
    fn task_card_options(&self, snapshot: &TaskSnapshot, census: bool) -> Vec<Vec<Choice>> {
        let forward = Choice::new("Forward", format!("forward_{}", snapshot.number));
        if census {
            let mut rows = Vec::new();
            match lexicon::census_form_url(&snapshot.author_comment.comment) {
                Some(url) => {
                    rows.push(vec![Choice::link(lexicon::OPEN_CENSUS_FORM, url)]);
                }
                None => {
                    warn!(task = %snapshot.number, "census comment carries no form url");
                }
            }
            rows.push(vec![forward]);
            return rows;
        }
        let done = Choice::new("Done", format!("done_{}", snapshot.number));
        if snapshot.author.code == self.rules.hard_collection_code {
            return vec![vec![done]];
        }
        vec![vec![done], vec![forward]]
    }

    /// Maps one error to one terminal user message, applying the abort
    /// policy the error class demands.
    async fn failure_outcome(&self, user: UserId, err: TaskGateError) -> Outcome {
        match &err {
            TaskGateError::MalformedUserInput(detail) => {
                // State stays; the user just retries.
                warn!(user = %user, detail, "malformed input");
                Outcome::text(lexicon::RETRY_INPUT)
            }
            TaskGateError::MissingPrerequisiteState(detail) => {
                warn!(user = %user, detail, "dialogue state missing, clearing");
                self.sessions.clear(&user).await;
                Outcome::text(lexicon::RESTART_REQUIRED)
            }
            TaskGateError::InvalidRoleInput(detail) => {
                error!(user = %user, detail, "task routing data is inconsistent");
                self.abort_dialogue(user).await;
                Outcome::text(lexicon::GENERIC_FAILURE)
                    .with_alert(format!("Task routing data problem: {detail}"))
            }
            _ => {
                error!(user = %user, error = %err, "dialogue aborted");
                self.abort_dialogue(user).await;
                Outcome::text(lexicon::GENERIC_FAILURE)
            }
        }
    }

    /// Clears the dialogue and drops the cached snapshot it was built on.
    async fn abort_dialogue(&self, user: UserId) {
        if let Some(state) = self.sessions.load(&user).await {
            self.cache.delete(&state.task).await;
        }
        self.sessions.clear(&user).await;
    }
}
