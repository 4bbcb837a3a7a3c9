//! Error types for the bot core.
//!
//! [`DbotError`] is the top-level error; [`CommandError`] is used for command failures.

use thiserror::Error;

/// Top-level error for dbot (database, transport, command, payload decoding).
#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors produced by commands and command routing.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Generic command missing")]
    GenericMissing,

    #[error("Execution failed: {0}")]
    Failed(String),
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
