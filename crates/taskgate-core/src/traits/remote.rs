// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote task API trait: the typed request/response seam the flows
//! consume, implemented by the HTTP client in `taskgate-remote`.

use async_trait::async_trait;

use crate::error::TaskGateError;
use crate::types::{
    ResultDetail, ResultOption, ResultPayload, TaskId, TaskSnapshot, TaskUpdate, WorkerRecord,
};

/// Typed wrapper around the external workforce-management API.
///
/// All operations map to single HTTP requests. Reads may be repeated by the
/// caller; writes are never retried here. The remote API gives no
/// idempotency guarantee, so a failed write is surfaced, not repeated.
#[async_trait]
pub trait RemoteTasks: Send + Sync {
    /// Fetches the full task record by identifier.
    async fn get_task(&self, id: &TaskId) -> Result<TaskSnapshot, TaskGateError>;

    /// Lists tasks assigned to a worker with status `New` in the given group.
    async fn list_new_tasks(
        &self,
        worker_code: &str,
        group: &str,
    ) -> Result<Vec<TaskSnapshot>, TaskGateError>;

    /// Replaces a task record whole. Expects a created (2xx) response.
    async fn put_task(&self, update: &TaskUpdate) -> Result<(), TaskGateError>;

    /// Fetches a worker record by code.
    async fn get_worker(&self, code: &str) -> Result<WorkerRecord, TaskGateError>;

    /// Looks up the worker registered under the given chat id, if any.
    async fn get_worker_by_chat(
        &self,
        chat_id: &str,
    ) -> Result<Option<WorkerRecord>, TaskGateError>;

    /// Looks up a worker by normalized phone number, if any.
    async fn get_worker_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<WorkerRecord>, TaskGateError>;

    /// Fetches the designated controller (first record flagged `controller`).
    async fn get_controller(&self) -> Result<WorkerRecord, TaskGateError>;

    /// Writes a worker record back whole (registration: chat id assignment).
    async fn put_worker(&self, worker: &WorkerRecord) -> Result<(), TaskGateError>;

    /// Creates a worker comment; returns the created comment id.
    async fn post_worker_comment(
        &self,
        worker_code: &str,
        text: &str,
    ) -> Result<i64, TaskGateError>;

    /// Creates an author comment; returns the created comment id.
    async fn post_author_comment(
        &self,
        author_code: &str,
        text: &str,
    ) -> Result<i64, TaskGateError>;

    /// Creates a composite result record; returns the created result id.
    async fn post_result(&self, payload: &ResultPayload) -> Result<i64, TaskGateError>;

    /// Lists result options scoped by task group.
    async fn get_result_options(
        &self,
        group: &str,
    ) -> Result<Vec<ResultOption>, TaskGateError>;

    /// Fetches the descriptor of one result option.
    async fn get_result_detail(&self, id: i64) -> Result<ResultDetail, TaskGateError>;
}
