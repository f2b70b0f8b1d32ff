// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Forwarding dialogue steps.
//!
//! The candidate list comes from the escalation resolver; the user picks a
//! recipient, adds a comment, and the task is reassigned in a two-write
//! commit (author comment, then full task replace).

use tracing::info;

use taskgate_core::error::TaskGateError;
use taskgate_core::types::{TaskId, TaskSnapshot, TaskStatus, UserId};

use crate::dialogue::{ActiveFlow, DialogueState, ForwardingStage};
use crate::lexicon;
use crate::orchestrator::Orchestrator;
use crate::reply::{single_column, Choice, Outcome};
use crate::resolver::{resolve, ResolverInput, RoleRecord};

impl Orchestrator {
    /// `forward_<task>`: resolves the escalation candidates and opens a
    /// forwarding dialogue, superseding any dialogue already in progress.
    pub(crate) async fn start_forwarding(
        &self,
        user: UserId,
        task: TaskId,
    ) -> Result<Outcome, TaskGateError> {
        self.sessions.clear(&user).await;
        let snapshot = self.load_snapshot(&task).await?;

        let input = self.resolver_input(&snapshot).await?;
        let candidates = resolve(&input, &self.rules.soft_collection_code)?;

        self.sessions
            .store(&user, DialogueState::forwarding(task))
            .await;

        let shown = self.displayable_comment(&snapshot);
        let text = if shown.is_empty() {
            lexicon::PICK_RECIPIENT.to_owned()
        } else {
            format!("{shown}\n\n{}", lexicon::PICK_RECIPIENT)
        };
        let choices = candidates
            .into_iter()
            .map(|candidate| {
                Choice::new(candidate.name, format!("recipient_{}", candidate.code))
            })
            .collect();
        Ok(Outcome::choices(text, single_column(choices)))
    }

    /// Assembles the resolver input from the snapshot plus two remote
    /// lookups (designated controller, partner-side worker).
    async fn resolver_input(
        &self,
        snapshot: &TaskSnapshot,
    ) -> Result<ResolverInput, TaskGateError> {
        let controller = self.remote.get_controller().await?;
        let supervisor = snapshot.worker.supervisor.clone().ok_or_else(|| {
            TaskGateError::InvalidRoleInput(format!(
                "worker {} has no supervisor on record",
                snapshot.worker.code
            ))
        })?;
        let head = supervisor
            .head
            .clone()
            .map(|h| RoleRecord::new(h.code, h.name, h.controller));
        let partner = match &snapshot.worker.partner {
            Some(code) => {
                let worker = self.remote.get_worker(code).await?;
                Some(RoleRecord::new(worker.code, worker.name, worker.controller))
            }
            None => None,
        };

        Ok(ResolverInput {
            author: RoleRecord::new(
                snapshot.author.code.clone(),
                snapshot.author.name.clone(),
                snapshot.author.controller,
            ),
            supervisor: RoleRecord::new(supervisor.code, supervisor.name, supervisor.controller),
            controller: RoleRecord::new(controller.code, controller.name, controller.controller),
            worker: RoleRecord::new(
                snapshot.worker.code.clone(),
                snapshot.worker.name.clone(),
                snapshot.worker.controller,
            ),
            partner,
            head,
        })
    }

    /// Census author comments are `"<text>_<url>"`; only the text half is
    /// ever shown to a user.
    fn displayable_comment(&self, snapshot: &TaskSnapshot) -> String {
        let comment = snapshot.author_comment.comment.as_str();
        if snapshot.base.group == self.rules.census_group {
            comment.split('_').next().unwrap_or_default().to_owned()
        } else {
            comment.to_owned()
        }
    }

    pub(crate) async fn pick_recipient(
        &self,
        user: UserId,
        mut state: DialogueState,
        code: String,
    ) -> Result<Outcome, TaskGateError> {
        state.recipient = Some(code);
        state.flow = ActiveFlow::Forwarding(ForwardingStage::AwaitingComment);
        self.sessions.store(&user, state).await;
        Ok(Outcome::text(lexicon::ASK_FORWARD_COMMENT))
    }

    /// Terminal step: author comment, then full task replace with the new
    /// worker. The comment is authored by the forwarding worker, and on
    /// census tasks the machine-readable URL suffix is carried over.
    pub(crate) async fn commit_forwarding(
        &self,
        user: UserId,
        state: DialogueState,
        text: &str,
    ) -> Result<Outcome, TaskGateError> {
        let recipient = state.recipient.clone().ok_or_else(|| {
            TaskGateError::MissingPrerequisiteState("forwarding lost its recipient".to_owned())
        })?;

        let snapshot = self.load_snapshot(&state.task).await?;

        let comment = if snapshot.base.group == self.rules.census_group {
            match snapshot.author_comment.comment.split('_').nth(1) {
                Some(url) => format!("{text}_{url}"),
                None => text.to_owned(),
            }
        } else {
            text.to_owned()
        };
        let comment_id = self
            .remote
            .post_author_comment(&snapshot.worker.code, &comment)
            .await?;

        let mut update = snapshot.to_update();
        update.status = TaskStatus::Forwarded;
        update.edited = true;
        update.author_comment = comment_id;
        update.worker = recipient.clone();
        update.worker_comment = self.rules.placeholder_comment_id;
        self.remote.put_task(&update).await?;

        self.sessions.clear(&user).await;
        self.cache.delete(&state.task).await;
        info!(user = %user, task = %state.task, recipient = %recipient, "task forwarded");
        Ok(Outcome::text(lexicon::forwarding_success(&snapshot.name)))
    }
}
