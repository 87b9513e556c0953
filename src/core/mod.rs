//! Shell core logic.
//!
//! This module contains the engine of the terminal, independent of any
//! rendering layer:
//!
//! - [`parser`]: raw line to [`crate::models::ParsedCommand`]
//! - [`registry`]: command/plugin registration, validation, dispatch
//! - [`filesystem`]: the read-only virtual filesystem and path resolution
//! - [`autocomplete`]: tab completion for commands and paths
//! - [`commands`]: the built-in command catalog
//! - [`shell`]: the orchestrating loop, typing stream, cancellation
//! - [`validate`]: the validator chain run before dispatch
//! - [`error`]: per-domain error types

pub mod autocomplete;
pub mod commands;
pub mod error;
pub mod filesystem;
pub mod parser;
pub mod registry;
pub mod shell;
pub mod validate;

pub use autocomplete::{Completion, CompletionEngine, format_suggestions};
pub use filesystem::{DirEntry, VirtualFs};
pub use registry::{CommandRegistry, CommandSpec, Plugin};
pub use shell::{
    CancelHandle, CancelToken, OutputSink, Shell, ShellContext, TypingConfig, cancellation,
};
