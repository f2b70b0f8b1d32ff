// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the remote workforce-management API.
//!
//! Provides [`TaskApiClient`], the concrete [`RemoteTasks`] implementation:
//! request construction, token-header authentication, and translation of
//! transport and status failures into the Taskgate error taxonomy.
//!
//! Writes are sent exactly once. The remote API gives no idempotency
//! guarantee, so a failed write surfaces as an error instead of being
//! repeated; retry-on-miss policy lives in the orchestrator, not here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use taskgate_core::error::TaskGateError;
use taskgate_core::traits::RemoteTasks;
use taskgate_core::types::{
    CreatedId, ResultDetail, ResultOption, ResultPayload, TaskId, TaskSnapshot, TaskUpdate,
    WorkerRecord,
};

/// HTTP client for the task API.
///
/// Cheap to clone; the inner reqwest client pools connections.
#[derive(Debug, Clone)]
pub struct TaskApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl TaskApiClient {
    /// Creates a new client.
    ///
    /// `base_url` must end with a trailing slash (enforced by config
    /// validation); `api_token` is the opaque value for the
    /// `Authorization: Token <value>` header.
    pub fn new(base_url: String, api_token: &str) -> Result<Self, TaskGateError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Token {api_token}")).map_err(|e| {
                TaskGateError::Config(format!("invalid api_token header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TaskGateError::RemoteUnavailable {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a GET and parses the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TaskGateError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        debug!(%status, path, "GET response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, path, body = %body, "GET rejected");
            return Err(TaskGateError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(unavailable)?;
        serde_json::from_str(&body).map_err(|e| malformed(status.as_u16(), path, &e))
    }

    /// Sends a write (POST or PUT) once and parses the JSON body on success.
    async fn send_write<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T, TaskGateError> {
        let response = request.send().await.map_err(unavailable)?;

        let status = response.status();
        debug!(%status, path, "write response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, path, body = %body, "write rejected");
            return Err(TaskGateError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(unavailable)?;
        serde_json::from_str(&body).map_err(|e| malformed(status.as_u16(), path, &e))
    }

    /// Like [`send_write`] but discards the response body.
    async fn send_write_unit(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<(), TaskGateError> {
        let response = request.send().await.map_err(unavailable)?;

        let status = response.status();
        debug!(%status, path, "write response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, path, body = %body, "write rejected");
            return Err(TaskGateError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Runs a filtered worker query and returns the first record, if any.
    async fn first_worker(
        &self,
        query: &[(&str, &str)],
    ) -> Result<Option<WorkerRecord>, TaskGateError> {
        let workers: Vec<WorkerRecord> = self.get_json("worker_f/", query).await?;
        Ok(workers.into_iter().next())
    }
}

fn unavailable(e: reqwest::Error) -> TaskGateError {
    TaskGateError::RemoteUnavailable {
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

/// A success body that does not carry the expected keys is rejected at this
/// boundary, never propagated as a key error into a dialogue step.
fn malformed(status: u16, path: &str, e: &serde_json::Error) -> TaskGateError {
    warn!(status, path, error = %e, "malformed response body");
    TaskGateError::RemoteRejected {
        status,
        body: format!("malformed response body: {e}"),
    }
}

#[async_trait]
impl RemoteTasks for TaskApiClient {
    async fn get_task(&self, id: &TaskId) -> Result<TaskSnapshot, TaskGateError> {
        self.get_json(&format!("all-tasks/{id}/"), &[]).await
    }

    async fn list_new_tasks(
        &self,
        worker_code: &str,
        group: &str,
    ) -> Result<Vec<TaskSnapshot>, TaskGateError> {
        self.get_json(
            "tasks_f/",
            &[
                ("worker", worker_code),
                ("status", "New"),
                ("base__group", group),
            ],
        )
        .await
    }

    async fn put_task(&self, update: &TaskUpdate) -> Result<(), TaskGateError> {
        let request = self.client.put(self.url("tasks/")).json(update);
        self.send_write_unit(request, "tasks/").await
    }

    async fn get_worker(&self, code: &str) -> Result<WorkerRecord, TaskGateError> {
        self.get_json(&format!("workers/{code}/"), &[]).await
    }

    async fn get_worker_by_chat(
        &self,
        chat_id: &str,
    ) -> Result<Option<WorkerRecord>, TaskGateError> {
        self.first_worker(&[("chat_id", chat_id)]).await
    }

    async fn get_worker_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<WorkerRecord>, TaskGateError> {
        self.first_worker(&[("phone", phone)]).await
    }

    async fn get_controller(&self) -> Result<WorkerRecord, TaskGateError> {
        self.first_worker(&[("controller", "true")])
            .await?
            .ok_or_else(|| {
                TaskGateError::InvalidRoleInput(
                    "remote returned no controller worker".to_string(),
                )
            })
    }

    async fn put_worker(&self, worker: &WorkerRecord) -> Result<(), TaskGateError> {
        // The workers endpoint replaces records in bulk; registration sends
        // a single-element list.
        let request = self.client.put(self.url("workers/")).json(&[worker]);
        self.send_write_unit(request, "workers/").await
    }

    async fn post_worker_comment(
        &self,
        worker_code: &str,
        text: &str,
    ) -> Result<i64, TaskGateError> {
        let body = serde_json::json!({ "comment": text, "worker": worker_code });
        let request = self.client.post(self.url("worker_comment/")).json(&body);
        let created: CreatedId = self.send_write(request, "worker_comment/").await?;
        Ok(created.id)
    }

    async fn post_author_comment(
        &self,
        author_code: &str,
        text: &str,
    ) -> Result<i64, TaskGateError> {
        let body = serde_json::json!({ "comment": text, "author": author_code });
        let request = self.client.post(self.url("author_comment/")).json(&body);
        let created: CreatedId = self.send_write(request, "author_comment/").await?;
        Ok(created.id)
    }

    async fn post_result(&self, payload: &ResultPayload) -> Result<i64, TaskGateError> {
        let request = self.client.post(self.url("result/")).json(payload);
        let created: CreatedId = self.send_write(request, "result/").await?;
        Ok(created.id)
    }

    async fn get_result_options(
        &self,
        group: &str,
    ) -> Result<Vec<ResultOption>, TaskGateError> {
        self.get_json("result-data_f/", &[("group", group)]).await
    }

    async fn get_result_detail(&self, id: i64) -> Result<ResultDetail, TaskGateError> {
        self.get_json(&format!("result-data/{id}/"), &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> TaskApiClient {
        TaskApiClient::new(format!("{}/", server.uri()), "secret-token").unwrap()
    }

    fn task_json(number: &str) -> serde_json::Value {
        serde_json::json!({
            "number": number,
            "name": "Visit partner",
            "date": "2026-03-01T09:00:00Z",
            "deadline": "2026-03-05T18:00:00Z",
            "status": "New",
            "edited": false,
            "author": {"code": "A1", "name": "Alice"},
            "worker": {"code": "W1", "name": "Walter"},
            "partner": {"code": "P1", "name": "Partner LLC", "workers": []},
            "base": {"number": "B1", "name": "Census", "group": "000000004"},
            "author_comment": {"id": 1, "comment": "go_http://x"},
            "worker_comment": {"id": 2, "comment": ""},
            "result": null
        })
    }

    #[tokio::test]
    async fn get_task_sends_token_header_and_parses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all-tasks/T-1/"))
            .and(header("authorization", "Token secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(task_json("T-1")))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let snap = client.get_task(&TaskId("T-1".into())).await.unwrap();
        assert_eq!(snap.number.0, "T-1");
        assert_eq!(snap.base.group, "000000004");
    }

    #[tokio::test]
    async fn list_new_tasks_filters_by_worker_status_group() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks_f/"))
            .and(query_param("worker", "W1"))
            .and(query_param("status", "New"))
            .and(query_param("base__group", "000000002"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([task_json("T-1"), task_json("T-2")])),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let tasks = client.list_new_tasks("W1", "000000002").await.unwrap();
        assert_eq!(tasks.len(), 2);
    }

    #[tokio::test]
    async fn post_worker_comment_returns_created_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/worker_comment/"))
            .and(body_partial_json(
                serde_json::json!({"comment": "done", "worker": "W1"}),
            ))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 77})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let id = client.post_worker_comment("W1", "done").await.unwrap();
        assert_eq!(id, 77);
    }

    #[tokio::test]
    async fn put_task_rejection_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/tasks/"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad payload"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let snap: TaskSnapshot = serde_json::from_value(task_json("T-1")).unwrap();
        let err = client.put_task(&snap.to_update()).await.unwrap_err();
        match err {
            TaskGateError::RemoteRejected { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "bad payload");
            }
            other => panic!("expected RemoteRejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all-tasks/T-1/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"nope": true})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.get_task(&TaskId("T-1".into())).await.unwrap_err();
        assert!(matches!(err, TaskGateError::RemoteRejected { status: 200, .. }));
    }

    #[tokio::test]
    async fn worker_by_chat_returns_none_on_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/worker_f/"))
            .and(query_param("chat_id", "555"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let worker = client.get_worker_by_chat("555").await.unwrap();
        assert!(worker.is_none());
    }

    #[tokio::test]
    async fn missing_controller_is_invalid_role_input() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/worker_f/"))
            .and(query_param("controller", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.get_controller().await.unwrap_err();
        assert!(matches!(err, TaskGateError::InvalidRoleInput(_)));
    }

    #[tokio::test]
    async fn transport_failure_is_remote_unavailable() {
        // Nothing listens on this port.
        let client = TaskApiClient::new("http://127.0.0.1:9/".into(), "t").unwrap();
        let err = client.get_task(&TaskId("T-1".into())).await.unwrap_err();
        assert!(matches!(err, TaskGateError::RemoteUnavailable { .. }));
    }

    #[tokio::test]
    async fn put_worker_wraps_record_in_list() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/workers/"))
            .and(body_partial_json(serde_json::json!([{"code": "W1"}])))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let worker: WorkerRecord = serde_json::from_value(serde_json::json!({
            "code": "W1",
            "name": "Walter",
            "chat_id": "555"
        }))
        .unwrap();
        client.put_worker(&worker).await.unwrap();
    }
}
