// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote task API adapter for the Taskgate bot.
//!
//! Implements [`taskgate_core::traits::RemoteTasks`] over HTTP via reqwest.

pub mod client;

pub use client::TaskApiClient;
