//! foliosh: an embeddable portfolio terminal core.
//!
//! The crate implements the engine of a terminal-styled portfolio site:
//! a command parser, a command/plugin registry with input validation, a
//! read-only virtual filesystem, tab completion, durable session state
//! (history and preferences), and a thin orchestrating shell loop that
//! streams output with a typing animation.
//!
//! Rendering is deliberately out of scope. The shell produces plain output
//! lines through the [`core::OutputSink`] trait; any frontend (the bundled
//! demo REPL, a web terminal, tests) supplies the sink.
//!
//! # Quick start
//!
//! ```no_run
//! use foliosh::config::default_filesystem;
//! use foliosh::core::{Shell, cancellation};
//! use foliosh::session::SessionStore;
//!
//! # #[tokio::main] async fn main() {
//! let mut shell = Shell::new(default_filesystem(), SessionStore::in_memory());
//! let mut sink: Vec<String> = Vec::new();
//! let (_handle, mut token) = cancellation();
//! shell.run_line("ls -la /", &mut sink, &mut token).await.unwrap();
//! # }
//! ```

pub mod config;
pub mod core;
pub mod models;
pub mod session;
pub mod utils;

pub use core::{Shell, ShellContext};
pub use session::SessionStore;
