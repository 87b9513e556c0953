//! Demo REPL for the foliosh shell core.
//!
//! Reads lines from stdin, streams command output to stdout, and persists
//! session state under a local directory. This binary exists to exercise the
//! library end to end; real frontends embed [`foliosh::Shell`] directly.

use std::io::{self, BufRead, Write};

use foliosh::config::{APP_NAME, default_filesystem};
use foliosh::core::{OutputSink, Shell, cancellation};
use foliosh::session::{FileStore, SessionStore};

/// Sink that writes to stdout and clears via ANSI escapes.
struct StdoutSink;

impl OutputSink for StdoutSink {
    fn line(&mut self, line: &str) {
        println!("{line}");
    }

    fn clear(&mut self) {
        print!("\u{1b}[2J\u{1b}[H");
        let _ = io::stdout().flush();
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let state_dir =
        std::env::var("FOLIOSH_STATE_DIR").unwrap_or_else(|_| format!("./.{APP_NAME}"));
    let session = SessionStore::new(Box::new(FileStore::open(state_dir)));

    let mut shell = Shell::new(default_filesystem(), session);
    let mut sink = StdoutSink;

    if let Some(banner) = shell.welcome_lines() {
        for line in banner {
            println!("{line}");
        }
    }

    let stdin = io::stdin();
    loop {
        print!("{}", shell.prompt());
        let _ = io::stdout().flush();

        let mut raw = String::new();
        match stdin.lock().read_line(&mut raw) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let trimmed = raw.trim();
        if trimmed == "exit" || trimmed == "quit" {
            break;
        }

        let (_handle, mut token) = cancellation();
        if let Err(err) = shell.run_line(&raw, &mut sink, &mut token).await {
            eprintln!("{err}");
        }
    }
}
