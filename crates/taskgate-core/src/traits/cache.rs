// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snapshot cache trait: a short-TTL keyed store for task snapshots.

use async_trait::async_trait;

use crate::types::{TaskId, TaskSnapshot};

/// Short-lived store mapping task identifier to its full snapshot.
///
/// Entries expire after the TTL fixed at construction (180 seconds by
/// default) and are deleted explicitly when a dialogue finishes. Concurrent
/// get/put/delete must be safe; implementations rely on per-key atomic
/// operations rather than external locking.
#[async_trait]
pub trait SnapshotCache: Send + Sync {
    /// Returns the cached snapshot, or `None` if absent or expired.
    async fn get(&self, id: &TaskId) -> Option<TaskSnapshot>;

    /// Stores a snapshot keyed by its task id, resetting the TTL.
    async fn put(&self, snapshot: &TaskSnapshot);

    /// Removes the entry, if present.
    async fn delete(&self, id: &TaskId);
}
