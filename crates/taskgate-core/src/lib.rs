// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Taskgate bot.
//!
//! This crate provides the error taxonomy, the typed records exchanged with
//! the remote workforce-management API, and the adapter traits implemented
//! by the HTTP client and the snapshot cache.

pub mod error;
pub mod traits;
pub mod types;

pub use error::TaskGateError;
pub use traits::{RemoteTasks, SnapshotCache};
pub use types::{TaskId, TaskSnapshot, TaskStatus, UserId};
