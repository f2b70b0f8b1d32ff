// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Taskgate bot.

use thiserror::Error;

/// The primary error type used across Taskgate adapter traits and flow logic.
#[derive(Debug, Error)]
pub enum TaskGateError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// The remote task API could not be reached (connect, timeout, TLS).
    #[error("remote unavailable: {message}")]
    RemoteUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote task API answered with a non-success status.
    ///
    /// Also raised when a success body does not carry the expected keys;
    /// malformed responses are rejected here, never propagated as key errors.
    #[error("remote rejected request: status {status}")]
    RemoteRejected { status: u16, body: String },

    /// A dialogue advanced without an expected prior field. Treated as
    /// state corruption: the flow aborts and the user is asked to restart.
    #[error("missing prerequisite state: {0}")]
    MissingPrerequisiteState(String),

    /// The escalation resolver was called with incomplete role data.
    /// A data-integrity error surfaced to the operator channel.
    #[error("invalid role input: {0}")]
    InvalidRoleInput(String),

    /// An inbound button payload could not be parsed.
    #[error("malformed user input: {0}")]
    MalformedUserInput(String),

    /// Chat transport errors (send failure, message format).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
