// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned domain records for tests.

use taskgate_core::types::{
    ResultDetail, ResultOption, TaskSnapshot, WorkerRecord,
};

/// A routable debit-group task snapshot: partnered worker with a full
/// supervisor/head chain and one partner-side contact person.
pub fn snapshot(number: &str) -> TaskSnapshot {
    snapshot_in_group(number, "000000002")
}

/// Same shape as [`snapshot`] with a caller-chosen base group.
pub fn snapshot_in_group(number: &str, group: &str) -> TaskSnapshot {
    serde_json::from_value(serde_json::json!({
        "number": number,
        "name": "Collect overdue invoice",
        "date": "2026-03-01T09:00:00Z",
        "deadline": "2026-03-10T18:00:00Z",
        "status": "New",
        "edited": false,
        "author": {"code": "A1", "name": "Alice"},
        "worker": {
            "code": "W1",
            "name": "Walter",
            "chat_id": "7",
            "supervisor": {
                "code": "S1",
                "name": "Sonia",
                "head": {"code": "H1", "name": "Hank"}
            },
            "partner": "PW1"
        },
        "partner": {
            "code": "P1",
            "name": "Partner LLC",
            "workers": [{"code": "C1", "name": "Carl", "positions": "buyer"}]
        },
        "base": {"number": "B1", "name": "Credit control", "group": group},
        "author_comment": {"id": 11, "comment": "please call"},
        "worker_comment": {"id": 12, "comment": ""},
        "result": null
    }))
    .expect("fixture snapshot is valid")
}

/// The worker the fixture snapshots are assigned to.
pub fn worker(code: &str) -> WorkerRecord {
    serde_json::from_value(serde_json::json!({
        "code": code,
        "name": format!("Worker {code}"),
        "phone": "79990001122"
    }))
    .expect("fixture worker is valid")
}

/// A worker flagged as the designated controller.
pub fn controller(code: &str) -> WorkerRecord {
    serde_json::from_value(serde_json::json!({
        "code": code,
        "name": format!("Controller {code}"),
        "controller": true
    }))
    .expect("fixture controller is valid")
}

pub fn result_option(id: i64, name: &str) -> ResultOption {
    ResultOption {
        id,
        name: name.to_owned(),
    }
}

pub fn result_detail(id: i64, name: &str, requires_control_date: bool) -> ResultDetail {
    ResultDetail {
        id,
        name: name.to_owned(),
        requires_control_date,
    }
}
