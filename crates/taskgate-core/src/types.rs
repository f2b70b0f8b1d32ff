// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain and wire types shared across the Taskgate workspace.
//!
//! The remote workforce-management API speaks JSON objects with a fixed key
//! set; everything here deserializes those objects into explicit records so
//! that a malformed response fails at the client boundary instead of deep
//! inside a dialogue step.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Opaque task identifier assigned by the remote system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chat-level user identifier. One dialogue is owned by one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task lifecycle status as stored by the remote system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum TaskStatus {
    New,
    Done,
    Forwarded,
    Rejected,
}

/// A contact person attached to a partner record.
///
/// The synthetic "no contact on file" placeholder carries a `None` code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactPerson {
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub positions: Option<String>,
}

/// A task party (author or partner): code, display name, controller flag,
/// and an optional nested contact-person list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyRef {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub controller: bool,
    #[serde(default)]
    pub workers: Vec<ContactPerson>,
}

/// Minimal party shape used for nested head references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadRef {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub controller: bool,
}

/// A worker's supervisor, with the department head nested inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupervisorRef {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub controller: bool,
    #[serde(default)]
    pub head: Option<HeadRef>,
}

/// A worker record as returned by the worker endpoints and embedded in a
/// task snapshot's `worker` field.
///
/// `extra` preserves keys this bot does not interpret so a registration PUT
/// sends the record back whole instead of silently dropping fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub controller: bool,
    #[serde(default)]
    pub supervisor: Option<SupervisorRef>,
    /// Partner code, when the worker services a counterparty.
    #[serde(default)]
    pub partner: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The task's grouping base: group key, display name, and base identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRef {
    pub number: String,
    pub name: String,
    pub group: String,
}

/// A stored comment reference: created id plus free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRef {
    pub id: i64,
    pub comment: String,
}

/// Immutable-per-fetch snapshot of a remote task record.
///
/// Never mutated in place; write operations build a [`TaskUpdate`] via
/// [`TaskSnapshot::to_update`] and PUT the merged record back whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub number: TaskId,
    pub name: String,
    pub date: String,
    pub deadline: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub edit_date: Option<String>,
    pub edited: bool,
    pub author: PartyRef,
    pub worker: WorkerRecord,
    pub partner: PartyRef,
    pub base: BaseRef,
    pub author_comment: CommentRef,
    pub worker_comment: CommentRef,
    #[serde(default)]
    pub result: Option<i64>,
}

impl TaskSnapshot {
    /// Builds the full-record PUT payload with every field copied verbatim.
    /// Callers override only the fields their operation changes.
    pub fn to_update(&self) -> TaskUpdate {
        TaskUpdate {
            number: self.number.clone(),
            name: self.name.clone(),
            date: self.date.clone(),
            deadline: self.deadline.clone(),
            edit_date: self.edit_date.clone(),
            status: self.status,
            edited: self.edited,
            author: self.author.code.clone(),
            worker: self.worker.code.clone(),
            partner: self.partner.code.clone(),
            base: self.base.number.clone(),
            author_comment: self.author_comment.id,
            worker_comment: self.worker_comment.id,
            result: self.result,
        }
    }

    /// Creation date with the ISO separators stripped for display.
    pub fn date_display(&self) -> String {
        clean_timestamp(&self.date)
    }

    /// Deadline with the ISO separators stripped for display.
    pub fn deadline_display(&self) -> String {
        clean_timestamp(&self.deadline)
    }
}

/// Strips the `T`/`Z` markers from a remote ISO timestamp for user display.
pub fn clean_timestamp(raw: &str) -> String {
    raw.replace('T', " ").replace('Z', "")
}

/// Full-record replace payload for `PUT tasks/`. Party references collapse
/// to their codes on write; comments and result collapse to their ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub number: TaskId,
    pub name: String,
    pub date: String,
    pub deadline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_date: Option<String>,
    pub status: TaskStatus,
    pub edited: bool,
    pub author: String,
    pub worker: String,
    pub partner: String,
    pub base: String,
    pub author_comment: i64,
    pub worker_comment: i64,
    pub result: Option<i64>,
}

/// A selectable result option scoped by task group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultOption {
    pub id: i64,
    pub name: String,
}

/// Descriptor of a chosen result option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDetail {
    pub id: i64,
    pub name: String,
    /// Wire key `control_data`: the result requires a control date.
    #[serde(rename = "control_data")]
    pub requires_control_date: bool,
}

/// Composite result record POSTed when a task is completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    #[serde(rename = "type")]
    pub action_type: String,
    pub result: String,
    /// `None` when the user picked the synthetic "no contact" placeholder.
    pub contact_person: Option<String>,
    pub base: String,
    pub task_number: TaskId,
    /// Serialized as `null` when the result declares no control date.
    pub control_date: Option<NaiveDate>,
}

/// Body of a created-entity response (`POST` returning `{"id": ...}`).
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedId {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_json() -> serde_json::Value {
        serde_json::json!({
            "number": "T-100",
            "name": "Collect overdue invoice",
            "date": "2026-03-01T09:00:00Z",
            "deadline": "2026-03-10T18:00:00Z",
            "status": "New",
            "edited": false,
            "author": {"code": "A1", "name": "Alice"},
            "worker": {
                "code": "W1",
                "name": "Walter",
                "supervisor": {
                    "code": "S1",
                    "name": "Sonia",
                    "head": {"code": "H1", "name": "Hank"}
                },
                "partner": "P1",
                "department": "east"
            },
            "partner": {
                "code": "P1",
                "name": "Partner LLC",
                "workers": [{"code": "C1", "name": "Carl", "positions": "buyer"}]
            },
            "base": {"number": "B1", "name": "Credit control", "group": "000000002"},
            "author_comment": {"id": 11, "comment": "please call"},
            "worker_comment": {"id": 12, "comment": ""},
            "result": null
        })
    }

    #[test]
    fn snapshot_deserializes_from_remote_shape() {
        let snap: TaskSnapshot = serde_json::from_value(snapshot_json()).unwrap();
        assert_eq!(snap.number, TaskId("T-100".into()));
        assert_eq!(snap.status, TaskStatus::New);
        assert_eq!(snap.worker.supervisor.as_ref().unwrap().code, "S1");
        assert_eq!(
            snap.worker.supervisor.unwrap().head.unwrap().code,
            "H1"
        );
        assert_eq!(snap.partner.workers.len(), 1);
        // Unknown worker keys survive into `extra`.
        let snap: TaskSnapshot = serde_json::from_value(snapshot_json()).unwrap();
        assert_eq!(
            snap.worker.extra.get("department").and_then(|v| v.as_str()),
            Some("east")
        );
    }

    #[test]
    fn to_update_copies_every_field_verbatim() {
        let snap: TaskSnapshot = serde_json::from_value(snapshot_json()).unwrap();
        let update = snap.to_update();
        assert_eq!(update.number, snap.number);
        assert_eq!(update.status, TaskStatus::New);
        assert!(!update.edited);
        assert_eq!(update.author, "A1");
        assert_eq!(update.worker, "W1");
        assert_eq!(update.partner, "P1");
        assert_eq!(update.base, "B1");
        assert_eq!(update.author_comment, 11);
        assert_eq!(update.worker_comment, 12);
        assert_eq!(update.result, None);
    }

    #[test]
    fn status_round_trips_wire_names() {
        for (status, wire) in [
            (TaskStatus::New, "\"New\""),
            (TaskStatus::Done, "\"Done\""),
            (TaskStatus::Forwarded, "\"Forwarded\""),
            (TaskStatus::Rejected, "\"Rejected\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
            let back: TaskStatus = serde_json::from_str(wire).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn result_payload_serializes_null_control_date() {
        let payload = ResultPayload {
            action_type: "call".into(),
            result: "Reached".into(),
            contact_person: None,
            base: "B1".into(),
            task_number: TaskId("T-100".into()),
            control_date: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "call");
        assert!(json["control_date"].is_null());
        assert!(json["contact_person"].is_null());
    }

    #[test]
    fn clean_timestamp_strips_markers() {
        assert_eq!(clean_timestamp("2026-03-01T09:00:00Z"), "2026-03-01 09:00:00");
    }
}
