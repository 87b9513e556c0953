//! Shell orchestration: the loop that ties parser, registry, filesystem,
//! completion, and session store together.
//!
//! One command runs to completion before the next is accepted. Output is
//! delivered as a simulated typing stream: each line is emitted after a small
//! randomized delay, the shell is busy for the whole stream, and a
//! cancellation token can stop the stream between lines.

use rand::Rng;
use tokio::sync::watch;
use tokio::time::{Duration, sleep};

use crate::config::{self, CLEAR_SENTINEL};
use crate::core::autocomplete::{Completion, CompletionEngine};
use crate::core::error::{RegistryError, ShellError};
use crate::core::filesystem::VirtualFs;
use crate::core::parser::parse;
use crate::core::registry::{CommandRegistry, CommandSpec, Plugin};
use crate::core::validate::CommandValidator;
use crate::models::{AnimationSpeed, CommandInfo};
use crate::session::SessionStore;

// ============================================================================
// Shell Context
// ============================================================================

/// Mutable state passed into every command handler.
///
/// The working directory lives here rather than in any global: handlers that
/// navigate mutate `cwd`, everything else reads it.
pub struct ShellContext {
    pub cwd: String,
    pub fs: VirtualFs,
    pub session: SessionStore,
    /// Documentation snapshot of the registry, refreshed by the shell after
    /// every registration change so `help`/`man` never need the registry
    /// itself.
    pub catalog: Vec<CommandInfo>,
}

impl ShellContext {
    pub fn new(fs: VirtualFs, session: SessionStore) -> Self {
        Self {
            cwd: "/".to_string(),
            fs,
            session,
            catalog: Vec::new(),
        }
    }
}

// ============================================================================
// Output Sink
// ============================================================================

/// Destination for rendered output lines. The rendering layer implements
/// this; tests use a plain `Vec<String>`.
pub trait OutputSink {
    fn line(&mut self, line: &str);

    /// Wipe everything rendered so far. Driven by the reserved clear
    /// sentinel, which is consumed here and never rendered.
    fn clear(&mut self);
}

impl OutputSink for Vec<String> {
    fn line(&mut self, line: &str) {
        self.push(line.to_string());
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

// ============================================================================
// Cancellation
// ============================================================================

/// Create a linked cancel handle/token pair for one output stream.
pub fn cancellation() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle(tx), CancelToken(rx))
}

/// Caller-side handle that cancels the stream it is linked to.
pub struct CancelHandle(watch::Sender<bool>);

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.0.send(true);
    }
}

/// Stream-side token polled between emitted lines.
pub struct CancelToken(watch::Receiver<bool>);

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolve when cancelled. Pends forever if the handle is dropped
    /// without cancelling.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.0.borrow() {
                return;
            }
            if self.0.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

// ============================================================================
// Typing Stream Configuration
// ============================================================================

/// Per-line delay bounds for the simulated typing stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl TypingConfig {
    /// No delay at all; used by tests and non-interactive embeddings.
    pub const INSTANT: Self = Self {
        min_delay_ms: 0,
        max_delay_ms: 0,
    };

    pub fn for_speed(speed: AnimationSpeed) -> Self {
        match speed {
            AnimationSpeed::Off => Self::INSTANT,
            AnimationSpeed::Slow => Self {
                min_delay_ms: 30,
                max_delay_ms: 80,
            },
            AnimationSpeed::Normal => Self {
                min_delay_ms: 10,
                max_delay_ms: 40,
            },
            AnimationSpeed::Fast => Self {
                min_delay_ms: 2,
                max_delay_ms: 10,
            },
        }
    }

    fn sample(&self) -> Duration {
        // The fields are public; inverted bounds clamp instead of panicking
        // in gen_range.
        let max = self.max_delay_ms.max(self.min_delay_ms);
        if max == 0 {
            return Duration::ZERO;
        }
        let ms = rand::thread_rng().gen_range(self.min_delay_ms..=max);
        Duration::from_millis(ms)
    }
}

/// Holds the busy flag for the lifetime of one output stream.
///
/// Clearing in `Drop` also covers an abandoned stream: if the `run_line`
/// future is dropped mid-way, the flag is released rather than leaving the
/// shell busy forever.
struct BusyGuard<'a>(&'a mut bool);

impl<'a> BusyGuard<'a> {
    fn engage(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

// ============================================================================
// Shell
// ============================================================================

/// The interactive shell instance.
pub struct Shell {
    registry: CommandRegistry,
    ctx: ShellContext,
    completion: CompletionEngine,
    busy: bool,
    typing_override: Option<TypingConfig>,
}

impl Shell {
    /// Build a shell over a filesystem and session, with the built-in
    /// command catalog registered.
    pub fn new(fs: VirtualFs, session: SessionStore) -> Self {
        let mut registry = CommandRegistry::new();
        registry.register_commands(crate::core::commands::builtin_commands());

        let mut shell = Self {
            registry,
            ctx: ShellContext::new(fs, session),
            completion: CompletionEngine::new(),
            busy: false,
            typing_override: None,
        };
        shell.refresh_catalog();
        shell
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn context(&self) -> &ShellContext {
        &self.ctx
    }

    /// Force a fixed typing configuration instead of deriving it from the
    /// animation-speed preference.
    pub fn set_typing(&mut self, typing: TypingConfig) {
        self.typing_override = Some(typing);
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Prompt string for the rendering layer; reads the context cwd.
    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$ ",
            config::USER_NAME,
            config::HOST_NAME,
            self.ctx.cwd
        )
    }

    /// Welcome banner lines, if the preference asks for them.
    pub fn welcome_lines(&self) -> Option<Vec<String>> {
        if self.ctx.session.preferences().show_welcome {
            Some(config::WELCOME_BANNER.lines().map(str::to_string).collect())
        } else {
            None
        }
    }

    // ------------------------------------------------------------------
    // Registration passthroughs
    // ------------------------------------------------------------------

    /// Register a plugin and refresh the documentation catalog.
    pub async fn register_plugin(&mut self, plugin: Plugin) -> Result<(), RegistryError> {
        self.registry.register_plugin(plugin).await?;
        self.refresh_catalog();
        Ok(())
    }

    pub async fn unregister_plugin(&mut self, name: &str) -> Result<(), RegistryError> {
        let result = self.registry.unregister_plugin(name).await;
        self.refresh_catalog();
        result
    }

    /// Register one command on the live shell, refreshing the catalog.
    pub fn register_command(&mut self, spec: CommandSpec) {
        self.registry.register_command(spec);
        self.refresh_catalog();
    }

    pub fn add_validator(&mut self, validator: Box<dyn CommandValidator>) {
        self.registry.add_validator(validator);
    }

    pub fn remove_validator(&mut self, name: &str) -> bool {
        self.registry.remove_validator(name)
    }

    fn refresh_catalog(&mut self) {
        self.ctx.catalog = self.registry.catalog();
    }

    // ------------------------------------------------------------------
    // Completion
    // ------------------------------------------------------------------

    /// Tab completion over the current input buffer. Disabled while a
    /// command is streaming and when the preference turns it off.
    pub fn complete(&mut self, input: &str, cursor: usize) -> Completion {
        if self.busy || !self.ctx.session.preferences().autocomplete {
            return Completion {
                completed: input.to_string(),
                suggestions: Vec::new(),
                show_suggestions: false,
            };
        }
        self.completion
            .complete(input, cursor, &self.registry, &self.ctx.fs, &self.ctx.cwd)
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Parse, validate, and dispatch one line synchronously, returning the
    /// raw output lines (clear sentinel included). History is updated.
    pub fn execute(&mut self, raw: &str) -> Vec<String> {
        let parsed = parse(raw);
        let lines = self.registry.execute(&parsed, &mut self.ctx);
        self.ctx.session.add_command(raw);
        lines
    }

    /// Run one input line and stream its output to the sink.
    ///
    /// Rejects input while a previous stream is still running. Blank input
    /// is a no-op. The clear sentinel wipes the sink instead of rendering.
    pub async fn run_line(
        &mut self,
        raw: &str,
        sink: &mut dyn OutputSink,
        cancel: &mut CancelToken,
    ) -> Result<(), ShellError> {
        if self.busy {
            return Err(ShellError::Busy);
        }
        if raw.trim().is_empty() {
            return Ok(());
        }

        let mut lines = self.execute(raw);
        // Validator warnings may precede the sentinel, so the whole list is
        // scanned; the sentinel itself is consumed, never streamed.
        if lines.iter().any(|l| l == CLEAR_SENTINEL) {
            sink.clear();
            lines.retain(|l| l != CLEAR_SENTINEL);
        }

        let typing = self
            .typing_override
            .unwrap_or_else(|| TypingConfig::for_speed(self.ctx.session.preferences().animation_speed));

        let busy = BusyGuard::engage(&mut self.busy);
        for line in &lines {
            if cancel.is_cancelled() {
                break;
            }
            let delay = typing.sample();
            if !delay.is_zero() {
                tokio::select! {
                    _ = sleep(delay) => {}
                    _ = cancel.cancelled() => break,
                }
            }
            sink.line(line);
        }
        drop(busy);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_filesystem;

    fn shell() -> Shell {
        let mut shell = Shell::new(default_filesystem(), SessionStore::in_memory());
        shell.set_typing(TypingConfig::INSTANT);
        shell
    }

    async fn run(shell: &mut Shell, raw: &str) -> Vec<String> {
        let mut sink: Vec<String> = Vec::new();
        let (_handle, mut token) = cancellation();
        shell.run_line(raw, &mut sink, &mut token).await.unwrap();
        sink
    }

    #[tokio::test]
    async fn test_pwd_starts_at_root() {
        let mut shell = shell();
        assert_eq!(run(&mut shell, "pwd").await, vec!["/"]);
    }

    #[tokio::test]
    async fn test_cd_then_pwd_then_back() {
        let mut shell = shell();
        run(&mut shell, "cd projects").await;
        assert_eq!(run(&mut shell, "pwd").await, vec!["/projects"]);
        assert_eq!(shell.prompt(), "guest@folio:/projects$ ");

        run(&mut shell, "cd ..").await;
        assert_eq!(run(&mut shell, "pwd").await, vec!["/"]);
    }

    #[tokio::test]
    async fn test_blank_input_is_noop() {
        let mut shell = shell();
        let out = run(&mut shell, "   ").await;
        assert!(out.is_empty());
        assert!(shell.context().session.history().is_empty());
    }

    #[tokio::test]
    async fn test_clear_wipes_sink() {
        let mut shell = shell();
        let mut sink: Vec<String> = Vec::new();
        let (_handle, mut token) = cancellation();

        shell.run_line("pwd", &mut sink, &mut token).await.unwrap();
        assert!(!sink.is_empty());

        shell.run_line("clear", &mut sink, &mut token).await.unwrap();
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_history_records_lines() {
        let mut shell = shell();
        run(&mut shell, "pwd").await;
        run(&mut shell, "ls").await;
        assert_eq!(shell.context().session.history(), vec!["pwd", "ls"]);
    }

    #[tokio::test]
    async fn test_unknown_command_single_line() {
        let mut shell = shell();
        let out = run(&mut shell, "frobnicate").await;
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with("frobnicate: command not found"));
    }

    #[tokio::test]
    async fn test_cancel_stops_stream() {
        let mut shell = shell();
        shell.set_typing(TypingConfig {
            min_delay_ms: 50,
            max_delay_ms: 50,
        });

        let mut sink: Vec<String> = Vec::new();
        let (handle, mut token) = cancellation();
        handle.cancel();

        // Already-cancelled token: the stream emits nothing.
        shell.run_line("help", &mut sink, &mut token).await.unwrap();
        assert!(sink.is_empty());
        assert!(!shell.is_busy());
    }

    #[tokio::test]
    async fn test_dropped_stream_releases_busy() {
        let mut shell = shell();
        shell.set_typing(TypingConfig {
            min_delay_ms: 50,
            max_delay_ms: 50,
        });

        let mut sink: Vec<String> = Vec::new();
        {
            let (_handle, mut token) = cancellation();
            let stream = shell.run_line("help", &mut sink, &mut token);
            // Abandon the stream mid-way, as an embedder racing it against a
            // timeout would.
            let raced = tokio::time::timeout(Duration::from_millis(60), stream).await;
            assert!(raced.is_err());
        }
        assert!(!shell.is_busy());

        // The shell accepts input again.
        let (_handle, mut token) = cancellation();
        let mut sink: Vec<String> = Vec::new();
        shell.run_line("pwd", &mut sink, &mut token).await.unwrap();
        assert_eq!(sink, vec!["/"]);
    }

    #[tokio::test]
    async fn test_clear_after_warning_still_wipes() {
        use crate::core::validate::ValidationReport;
        use crate::models::ParsedCommand;

        struct Nag;
        impl CommandValidator for Nag {
            fn name(&self) -> &str {
                "nag"
            }
            fn validate(&self, _: &ParsedCommand) -> ValidationReport {
                ValidationReport::warning("deprecated")
            }
        }

        let mut shell = shell();
        shell.add_validator(Box::new(Nag));

        let mut sink: Vec<String> = Vec::new();
        let (_handle, mut token) = cancellation();
        shell.run_line("pwd", &mut sink, &mut token).await.unwrap();
        assert!(!sink.is_empty());

        // The wipe happens even with a warning prepended, and the sentinel
        // itself is never rendered.
        shell.run_line("clear", &mut sink, &mut token).await.unwrap();
        assert_eq!(sink, vec!["warning: deprecated"]);
    }

    #[tokio::test]
    async fn test_live_command_registration_updates_catalog() {
        use crate::models::Category;

        let mut shell = shell();
        shell.register_command(CommandSpec::new(
            "version",
            "show the shell version",
            Category::System,
            |_, _| Ok(vec!["0.1.0".to_string()]),
        ));

        assert_eq!(run(&mut shell, "version").await, vec!["0.1.0"]);
        let help = run(&mut shell, "help version").await;
        assert!(help[0].starts_with("version: "));
    }

    #[tokio::test]
    async fn test_completion_disabled_by_preference() {
        use crate::models::PreferencesPatch;

        let mut shell = shell();
        let completed = shell.complete("he", 2);
        assert_eq!(completed.completed, "help ");

        shell.ctx.session.save_preferences(PreferencesPatch {
            autocomplete: Some(false),
            ..Default::default()
        });
        let completed = shell.complete("he", 2);
        assert_eq!(completed.completed, "he");
        assert!(!completed.show_suggestions);
    }

    #[test]
    fn test_typing_config_tiers() {
        assert_eq!(TypingConfig::for_speed(AnimationSpeed::Off), TypingConfig::INSTANT);
        let slow = TypingConfig::for_speed(AnimationSpeed::Slow);
        let fast = TypingConfig::for_speed(AnimationSpeed::Fast);
        assert!(slow.max_delay_ms > fast.max_delay_ms);
        assert_eq!(TypingConfig::INSTANT.sample(), Duration::ZERO);
    }

    #[test]
    fn test_sample_clamps_inverted_bounds() {
        let inverted = TypingConfig {
            min_delay_ms: 50,
            max_delay_ms: 10,
        };
        assert_eq!(inverted.sample(), Duration::from_millis(50));
    }
}
