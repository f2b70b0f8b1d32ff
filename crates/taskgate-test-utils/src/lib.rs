// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted mocks and fixtures shared by the Taskgate test suites.

pub mod fixtures;
pub mod mock_remote;

pub use mock_remote::{MockRemote, RemoteCall};
