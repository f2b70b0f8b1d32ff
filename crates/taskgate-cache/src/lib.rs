// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Short-TTL in-process snapshot cache.
//!
//! Implements [`SnapshotCache`] over a concurrent map. Entries carry an
//! absolute expiry instant fixed at insert time; expired entries are dropped
//! lazily on the next access. Per-key atomicity comes from the map itself,
//! with no additional locking.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use taskgate_core::traits::SnapshotCache;
use taskgate_core::types::{TaskId, TaskSnapshot};

struct Entry {
    snapshot: TaskSnapshot,
    expires_at: Instant,
}

/// In-memory snapshot cache with a fixed per-entry TTL.
pub struct TtlSnapshotCache {
    entries: DashMap<TaskId, Entry>,
    ttl: Duration,
}

impl TtlSnapshotCache {
    /// Creates a cache whose entries live for `ttl` after each put.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }
}

#[async_trait]
impl SnapshotCache for TtlSnapshotCache {
    async fn get(&self, id: &TaskId) -> Option<TaskSnapshot> {
        match self.entries.get(id) {
            Some(entry) if entry.expires_at > Instant::now() => {
                Some(entry.snapshot.clone())
            }
            Some(_) => {
                drop(self.entries.remove(id));
                debug!(task = %id, "snapshot expired");
                None
            }
            None => None,
        }
    }

    async fn put(&self, snapshot: &TaskSnapshot) {
        let id = snapshot.number.clone();
        debug!(task = %id, ttl_secs = self.ttl.as_secs(), "snapshot cached");
        self.entries.insert(
            id,
            Entry {
                snapshot: snapshot.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    async fn delete(&self, id: &TaskId) {
        if self.entries.remove(id).is_some() {
            debug!(task = %id, "snapshot invalidated");
        }
    }
}
