//! Error types for the shell core.
//!
//! Each domain gets its own enum:
//!
//! - [`CommandError`] - faults raised inside command handlers
//! - [`RegistryError`] - plugin lifecycle and registration failures
//! - [`StorageError`] - durable session store failures
//! - [`ShellError`] - orchestrator-level failures
//!
//! Handler faults never escape the registry dispatch boundary; they are
//! rendered into output lines there. The other errors propagate with `?`
//! inside the crate.

use thiserror::Error;

/// A fault raised inside a command handler.
///
/// Ordinary user-facing failures ("no such file") are returned as output
/// lines by the handlers themselves; `CommandError` is reserved for genuine
/// faults, which the registry catches and renders.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("missing operand: {0}")]
    MissingOperand(&'static str),
    #[error("{0}")]
    Failed(String),
}

/// Failure reported by a plugin lifecycle hook.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct PluginError(pub String);

/// Registration and lifecycle errors from the command registry.
///
/// Duplicate and unknown-plugin cases are rejected before any registry state
/// is mutated.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("plugin '{0}' is already registered")]
    DuplicatePlugin(String),
    #[error("plugin '{0}' is not registered")]
    UnknownPlugin(String),
    #[error("command '{command}' from plugin '{plugin}' conflicts with an existing command")]
    CommandConflict { plugin: String, command: String },
    #[error("plugin '{plugin}' failed to initialize: {source}")]
    InitializeFailed {
        plugin: String,
        #[source]
        source: PluginError,
    },
    #[error("plugin '{plugin}' failed to clean up: {source}")]
    CleanupFailed {
        plugin: String,
        #[source]
        source: PluginError,
    },
}

/// Durable store failures. These are always recoverable: the session layer
/// degrades to in-memory state when it sees one.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("failed to read key '{key}': {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write key '{key}': {reason}")]
    Write { key: String, reason: String },
    #[error("invalid stored value for key '{key}': {reason}")]
    Decode { key: String, reason: String },
}

/// Orchestrator-level errors surfaced to the embedding layer.
#[derive(Debug, Error)]
pub enum ShellError {
    /// A command is streaming output; new input is rejected until it ends.
    #[error("shell is busy streaming output")]
    Busy,
}
