// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion dialogue steps.
//!
//! Action type, contact person, result, optional control date, comment,
//! then a three-write commit. Each remote write gates the next; any failure
//! aborts the whole dialogue so the task is never left half-updated.

use tracing::info;

use taskgate_core::error::TaskGateError;
use taskgate_core::types::{ResultPayload, TaskId, TaskStatus, UserId};

use crate::action::CONTACT_NONE;
use crate::calendar::{CalendarAction, CalendarOutcome, CalendarView};
use crate::dialogue::{ActiveFlow, CompletionStage, ContactChoice, DialogueState};
use crate::lexicon;
use crate::orchestrator::Orchestrator;
use crate::reply::{single_column, Choice, Outcome};

impl Orchestrator {
    /// `done_<task>`: opens a completion dialogue, superseding any dialogue
    /// already in progress.
    pub(crate) async fn start_completion(
        &self,
        user: UserId,
        task: TaskId,
    ) -> Result<Outcome, TaskGateError> {
        self.sessions.clear(&user).await;
        let snapshot = self.load_snapshot(&task).await?;
        self.sessions
            .store(&user, DialogueState::completion(task))
            .await;

        let choices = lexicon::ACTION_TYPES
            .iter()
            .map(|(tag, label)| Choice::new(*label, format!("type_{tag}")))
            .collect();
        Ok(Outcome::choices(
            format!("{}\n{}", snapshot.name, lexicon::PICK_ACTION_TYPE),
            single_column(choices),
        ))
    }

    pub(crate) async fn pick_action_type(
        &self,
        user: UserId,
        mut state: DialogueState,
        tag: &str,
    ) -> Result<Outcome, TaskGateError> {
        let label = lexicon::action_type_label(tag).ok_or_else(|| {
            TaskGateError::MalformedUserInput(format!("unknown action type tag {tag:?}"))
        })?;
        let snapshot = self.load_snapshot(&state.task).await?;

        state.action_type = Some(label.to_owned());
        state.flow = ActiveFlow::Completion(CompletionStage::AwaitingContact);
        self.sessions.store(&user, state).await;

        let contacts = &snapshot.partner.workers;
        let choices: Vec<Choice> = if contacts.is_empty() {
            // Partner has nobody on file; offer exactly one placeholder.
            vec![Choice::new(
                lexicon::NO_CONTACT_ON_FILE,
                format!("contact_{CONTACT_NONE}"),
            )]
        } else {
            contacts
                .iter()
                .map(|contact| {
                    let payload = match &contact.code {
                        Some(code) => format!("contact_{code}"),
                        None => format!("contact_{CONTACT_NONE}"),
                    };
                    let label = match &contact.positions {
                        Some(positions) => format!("{} ({positions})", contact.name),
                        None => contact.name.clone(),
                    };
                    Choice::new(label, payload)
                })
                .collect()
        };
        Ok(Outcome::choices(lexicon::PICK_CONTACT, single_column(choices)))
    }

    pub(crate) async fn pick_contact(
        &self,
        user: UserId,
        mut state: DialogueState,
        code: Option<String>,
    ) -> Result<Outcome, TaskGateError> {
        let snapshot = self.load_snapshot(&state.task).await?;
        state.contact = Some(ContactChoice { code });
        state.flow = ActiveFlow::Completion(CompletionStage::AwaitingResult);
        self.sessions.store(&user, state).await;

        let options = self.remote.get_result_options(&snapshot.base.group).await?;
        if options.is_empty() {
            return Err(TaskGateError::Internal(format!(
                "no result options configured for group {}",
                snapshot.base.group
            )));
        }
        let choices = options
            .into_iter()
            .map(|option| Choice::new(option.name, format!("result_{}", option.id)))
            .collect();
        Ok(Outcome::choices(lexicon::PICK_RESULT, single_column(choices)))
    }

    pub(crate) async fn pick_result(
        &self,
        user: UserId,
        mut state: DialogueState,
        id: i64,
    ) -> Result<Outcome, TaskGateError> {
        let detail = self.remote.get_result_detail(id).await?;
        state.result_name = Some(detail.name);

        if detail.requires_control_date {
            let view = CalendarView::current();
            state.flow = ActiveFlow::Completion(CompletionStage::AwaitingControlDate(view));
            self.sessions.store(&user, state).await;
            Ok(Outcome::choices(lexicon::PICK_CONTROL_DATE, view.render()))
        } else {
            state.flow = ActiveFlow::Completion(CompletionStage::AwaitingComment);
            self.sessions.store(&user, state).await;
            Ok(Outcome::text(lexicon::ASK_COMPLETION_COMMENT))
        }
    }

    pub(crate) async fn pick_control_date(
        &self,
        user: UserId,
        mut state: DialogueState,
        view: CalendarView,
        action: CalendarAction,
    ) -> Result<Outcome, TaskGateError> {
        match view.process(action)? {
            CalendarOutcome::Rerender(next) => {
                state.flow = ActiveFlow::Completion(CompletionStage::AwaitingControlDate(next));
                self.sessions.store(&user, state).await;
                Ok(Outcome::choices(lexicon::PICK_CONTROL_DATE, next.render()))
            }
            CalendarOutcome::Selected(date) => {
                state.control_date = Some(date);
                state.flow = ActiveFlow::Completion(CompletionStage::AwaitingComment);
                self.sessions.store(&user, state).await;
                Ok(Outcome::text(lexicon::ASK_COMPLETION_COMMENT))
            }
        }
    }

    /// Terminal step: worker comment, composite result, task replace.
    pub(crate) async fn commit_completion(
        &self,
        user: UserId,
        state: DialogueState,
        text: &str,
    ) -> Result<Outcome, TaskGateError> {
        let action_type = state.action_type.clone().ok_or_else(|| {
            TaskGateError::MissingPrerequisiteState("completion lost its action type".to_owned())
        })?;
        let contact = state.contact.clone().ok_or_else(|| {
            TaskGateError::MissingPrerequisiteState("completion lost its contact".to_owned())
        })?;
        let result_name = state.result_name.clone().ok_or_else(|| {
            TaskGateError::MissingPrerequisiteState("completion lost its result".to_owned())
        })?;

        let snapshot = self.load_snapshot(&state.task).await?;

        let comment_id = self
            .remote
            .post_worker_comment(&snapshot.worker.code, text)
            .await?;
        let result_id = self
            .remote
            .post_result(&ResultPayload {
                action_type,
                result: result_name,
                contact_person: contact.code,
                base: snapshot.base.number.clone(),
                task_number: state.task.clone(),
                control_date: state.control_date,
            })
            .await?;

        let mut update = snapshot.to_update();
        update.status = TaskStatus::Done;
        update.edited = true;
        update.worker_comment = comment_id;
        update.result = Some(result_id);
        self.remote.put_task(&update).await?;

        self.sessions.clear(&user).await;
        self.cache.delete(&state.task).await;
        info!(user = %user, task = %state.task, "task completed");
        Ok(Outcome::text(lexicon::completion_success(&snapshot.name)))
    }
}
