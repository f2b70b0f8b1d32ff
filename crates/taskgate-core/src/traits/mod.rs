// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits at the seams of the bot: the remote task API and the
//! snapshot cache. Flow logic depends only on these, never on concrete
//! HTTP or storage code.

pub mod cache;
pub mod remote;

pub use cache::SnapshotCache;
pub use remote::RemoteTasks;
