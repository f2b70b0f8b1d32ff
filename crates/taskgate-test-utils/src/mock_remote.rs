// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted in-memory [`RemoteTasks`] double.
//!
//! Reads serve pre-loaded records; writes append to a call log the test can
//! assert on. Individual writes can be armed to fail so abort paths are
//! exercisable without a network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use taskgate_core::error::TaskGateError;
use taskgate_core::traits::RemoteTasks;
use taskgate_core::types::{
    ResultDetail, ResultOption, ResultPayload, TaskId, TaskSnapshot, TaskUpdate, WorkerRecord,
};

/// One recorded invocation, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    GetTask(String),
    ListNewTasks { worker: String, group: String },
    PutTask(TaskUpdate),
    GetWorker(String),
    GetWorkerByChat(String),
    GetWorkerByPhone(String),
    GetController,
    PutWorker(WorkerRecord),
    PostWorkerComment { worker: String, text: String },
    PostAuthorComment { author: String, text: String },
    PostResult(ResultPayload),
    GetResultOptions(String),
    GetResultDetail(i64),
}

#[derive(Default)]
pub struct MockRemote {
    tasks: Mutex<HashMap<String, TaskSnapshot>>,
    task_lists: Mutex<HashMap<(String, String), Vec<TaskSnapshot>>>,
    workers: Mutex<HashMap<String, WorkerRecord>>,
    workers_by_chat: Mutex<HashMap<String, WorkerRecord>>,
    workers_by_phone: Mutex<HashMap<String, WorkerRecord>>,
    controller: Mutex<Option<WorkerRecord>>,
    result_options: Mutex<HashMap<String, Vec<ResultOption>>>,
    result_details: Mutex<HashMap<i64, ResultDetail>>,
    next_comment_id: AtomicI64,
    next_result_id: AtomicI64,
    pub fail_put_task: AtomicBool,
    pub fail_put_worker: AtomicBool,
    pub fail_post_worker_comment: AtomicBool,
    pub fail_post_author_comment: AtomicBool,
    pub fail_post_result: AtomicBool,
    pub fail_get_task: AtomicBool,
    calls: Mutex<Vec<RemoteCall>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self {
            next_comment_id: AtomicI64::new(100),
            next_result_id: AtomicI64::new(500),
            ..Self::default()
        }
    }

    pub fn with_task(self, snapshot: TaskSnapshot) -> Self {
        self.tasks
            .lock()
            .unwrap()
            .insert(snapshot.number.0.clone(), snapshot);
        self
    }

    pub fn with_task_list(
        self,
        worker: &str,
        group: &str,
        tasks: Vec<TaskSnapshot>,
    ) -> Self {
        self.task_lists
            .lock()
            .unwrap()
            .insert((worker.to_owned(), group.to_owned()), tasks);
        self
    }

    pub fn with_worker(self, worker: WorkerRecord) -> Self {
        self.workers
            .lock()
            .unwrap()
            .insert(worker.code.clone(), worker);
        self
    }

    pub fn with_worker_by_chat(self, chat_id: &str, worker: WorkerRecord) -> Self {
        self.workers_by_chat
            .lock()
            .unwrap()
            .insert(chat_id.to_owned(), worker);
        self
    }

    pub fn with_worker_by_phone(self, phone: &str, worker: WorkerRecord) -> Self {
        self.workers_by_phone
            .lock()
            .unwrap()
            .insert(phone.to_owned(), worker);
        self
    }

    pub fn with_controller(self, worker: WorkerRecord) -> Self {
        *self.controller.lock().unwrap() = Some(worker);
        self
    }

    pub fn with_result_options(self, group: &str, options: Vec<ResultOption>) -> Self {
        self.result_options
            .lock()
            .unwrap()
            .insert(group.to_owned(), options);
        self
    }

    pub fn with_result_detail(self, detail: ResultDetail) -> Self {
        self.result_details.lock().unwrap().insert(detail.id, detail);
        self
    }

    /// Everything invoked so far, in order.
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: RemoteCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn not_found(what: &str) -> TaskGateError {
        TaskGateError::RemoteRejected {
            status: 404,
            body: format!("{what} not found"),
        }
    }

    fn armed_failure(flag: &AtomicBool) -> Result<(), TaskGateError> {
        if flag.load(Ordering::SeqCst) {
            Err(TaskGateError::RemoteRejected {
                status: 500,
                body: "scripted failure".to_owned(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteTasks for MockRemote {
    async fn get_task(&self, id: &TaskId) -> Result<TaskSnapshot, TaskGateError> {
        self.record(RemoteCall::GetTask(id.0.clone()));
        Self::armed_failure(&self.fail_get_task)?;
        self.tasks
            .lock()
            .unwrap()
            .get(&id.0)
            .cloned()
            .ok_or_else(|| Self::not_found("task"))
    }

    async fn list_new_tasks(
        &self,
        worker_code: &str,
        group: &str,
    ) -> Result<Vec<TaskSnapshot>, TaskGateError> {
        self.record(RemoteCall::ListNewTasks {
            worker: worker_code.to_owned(),
            group: group.to_owned(),
        });
        Ok(self
            .task_lists
            .lock()
            .unwrap()
            .get(&(worker_code.to_owned(), group.to_owned()))
            .cloned()
            .unwrap_or_default())
    }

    async fn put_task(&self, update: &TaskUpdate) -> Result<(), TaskGateError> {
        self.record(RemoteCall::PutTask(update.clone()));
        Self::armed_failure(&self.fail_put_task)
    }

    async fn get_worker(&self, code: &str) -> Result<WorkerRecord, TaskGateError> {
        self.record(RemoteCall::GetWorker(code.to_owned()));
        self.workers
            .lock()
            .unwrap()
            .get(code)
            .cloned()
            .ok_or_else(|| Self::not_found("worker"))
    }

    async fn get_worker_by_chat(
        &self,
        chat_id: &str,
    ) -> Result<Option<WorkerRecord>, TaskGateError> {
        self.record(RemoteCall::GetWorkerByChat(chat_id.to_owned()));
        Ok(self.workers_by_chat.lock().unwrap().get(chat_id).cloned())
    }

    async fn get_worker_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<WorkerRecord>, TaskGateError> {
        self.record(RemoteCall::GetWorkerByPhone(phone.to_owned()));
        Ok(self.workers_by_phone.lock().unwrap().get(phone).cloned())
    }

    async fn get_controller(&self) -> Result<WorkerRecord, TaskGateError> {
        self.record(RemoteCall::GetController);
        self.controller
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| TaskGateError::InvalidRoleInput("no controller on record".to_owned()))
    }

    async fn put_worker(&self, worker: &WorkerRecord) -> Result<(), TaskGateError> {
        self.record(RemoteCall::PutWorker(worker.clone()));
        Self::armed_failure(&self.fail_put_worker)
    }

    async fn post_worker_comment(
        &self,
        worker_code: &str,
        text: &str,
    ) -> Result<i64, TaskGateError> {
        self.record(RemoteCall::PostWorkerComment {
            worker: worker_code.to_owned(),
            text: text.to_owned(),
        });
        Self::armed_failure(&self.fail_post_worker_comment)?;
        Ok(self.next_comment_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn post_author_comment(
        &self,
        author_code: &str,
        text: &str,
    ) -> Result<i64, TaskGateError> {
        self.record(RemoteCall::PostAuthorComment {
            author: author_code.to_owned(),
            text: text.to_owned(),
        });
        Self::armed_failure(&self.fail_post_author_comment)?;
        Ok(self.next_comment_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn post_result(&self, payload: &ResultPayload) -> Result<i64, TaskGateError> {
        self.record(RemoteCall::PostResult(payload.clone()));
        Self::armed_failure(&self.fail_post_result)?;
        Ok(self.next_result_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn get_result_options(
        &self,
        group: &str,
    ) -> Result<Vec<ResultOption>, TaskGateError> {
        self.record(RemoteCall::GetResultOptions(group.to_owned()));
        Ok(self
            .result_options
            .lock()
            .unwrap()
            .get(group)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_result_detail(&self, id: i64) -> Result<ResultDetail, TaskGateError> {
        self.record(RemoteCall::GetResultDetail(id));
        self.result_details
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found("result detail"))
    }
}
