// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Escalation resolver.
//!
//! Given the people attached to a task, produces the ordered list of
//! forwarding candidates. Pure decision tables, evaluated top to bottom with
//! first match winning; two tables depending on whether a partner-side
//! contact exists. Duplicates by code are preserved: a person filling two
//! role slots appears twice in the list on purpose.

use tracing::debug;

use taskgate_core::error::TaskGateError;

/// One forwarding candidate: a person the task can be handed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRecord {
    pub code: String,
    pub name: String,
    pub controller: bool,
}

impl RoleRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>, controller: bool) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            controller,
        }
    }
}

/// Everyone the resolver can draw on for one task.
///
/// `author`, `supervisor`, `controller`, and `worker` are always known for a
/// routable task. `partner` is the partner-side contact when the worker
/// belongs to a partner organization; `head` is the supervisor's head.
#[derive(Debug, Clone)]
pub struct ResolverInput {
    pub author: RoleRecord,
    pub supervisor: RoleRecord,
    pub controller: RoleRecord,
    pub worker: RoleRecord,
    pub partner: Option<RoleRecord>,
    pub head: Option<RoleRecord>,
}

/// Resolves the ordered forwarding candidates for a task.
///
/// `soft_collection_code` is the sentinel author code marking tasks injected
/// by the soft-collection robot. Every branch of both tables ends in the
/// head, so a missing head is always [`TaskGateError::InvalidRoleInput`];
/// a missing partner just selects the partner-less table.
pub fn resolve(
    input: &ResolverInput,
    soft_collection_code: &str,
) -> Result<Vec<RoleRecord>, TaskGateError> {
    for (slot, record) in [
        ("author", &input.author),
        ("supervisor", &input.supervisor),
        ("controller", &input.controller),
        ("worker", &input.worker),
    ] {
        if record.code.is_empty() {
            return Err(TaskGateError::InvalidRoleInput(format!(
                "{slot} has an empty code"
            )));
        }
    }

    let head = input.head.clone().ok_or_else(|| {
        TaskGateError::InvalidRoleInput("supervisor has no head on record".to_owned())
    })?;

    let ResolverInput {
        author,
        supervisor,
        controller,
        worker,
        partner,
        ..
    } = input;

    let candidates = match partner {
        Some(partner) => {
            if partner.code.is_empty() {
                return Err(TaskGateError::InvalidRoleInput(
                    "partner contact has an empty code".to_owned(),
                ));
            }
            if author.controller && partner.code != supervisor.code {
                vec![supervisor.clone(), author.clone(), partner.clone(), head]
            } else if author.code == soft_collection_code {
                vec![supervisor.clone(), controller.clone(), partner.clone(), head]
            } else if author.code == supervisor.code && supervisor.code != partner.code {
                vec![controller.clone(), author.clone(), partner.clone(), head]
            } else if supervisor.code == partner.code {
                vec![controller.clone(), supervisor.clone(), head]
            } else if author.code == partner.code {
                vec![partner.clone(), controller.clone(), supervisor.clone(), head]
            } else if author.code == supervisor.code {
                vec![controller.clone(), author.clone(), head]
            } else if partner.code == worker.code {
                vec![controller.clone(), author.clone(), supervisor.clone(), head]
            } else {
                vec![
                    controller.clone(),
                    supervisor.clone(),
                    author.clone(),
                    partner.clone(),
                    head,
                ]
            }
        }
        None => {
            if author.controller {
                vec![supervisor.clone(), author.clone(), head]
            } else if author.code == soft_collection_code {
                vec![supervisor.clone(), controller.clone(), head]
            } else if author.code == supervisor.code {
                vec![controller.clone(), author.clone(), head]
            } else if author.code == controller.code {
                vec![controller.clone(), supervisor.clone(), head]
            } else {
                vec![controller.clone(), supervisor.clone(), author.clone(), head]
            }
        }
    };

    debug!(
        author = %author.code,
        worker = %worker.code,
        partnered = partner.is_some(),
        candidates = candidates.len(),
        "escalation resolved"
    );
    Ok(candidates)
}
