// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialogue flows for the Taskgate bot.
//!
//! This crate owns everything between "a classified user action arrived"
//! and "these replies go out": the escalation resolver, the completion and
//! forwarding state machines, the calendar sub-protocol, and the
//! orchestrator that ties them to the remote API and the snapshot cache.
//! It has no knowledge of any chat transport.

pub mod action;
pub mod calendar;
mod completion;
pub mod dialogue;
mod forwarding;
pub mod lexicon;
pub mod orchestrator;
pub mod reply;
pub mod resolver;

pub use action::{parse_callback, UserAction};
pub use dialogue::{DialogueState, InMemorySessionStore, SessionStore};
pub use orchestrator::{Orchestrator, RoutingRules, TaskGroup};
pub use reply::{Choice, ChoiceAction, Outcome, Reply};
