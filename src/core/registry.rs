//! Command registry: named handlers, plugin bundles, and the validator chain.
//!
//! The registry is the single dispatch point of the shell. Every executed
//! line flows through [`CommandRegistry::execute`]: validation first, then
//! handler lookup, then invocation with faults captured at this boundary so
//! the orchestrator only ever sees output lines.
//!
//! Plugins are independently loadable bundles of commands with asynchronous
//! `initialize`/`cleanup` hooks. Each plugin moves through an explicit state
//! machine (`Initializing -> Active -> CleaningUp`) so hooks cannot fire out
//! of order or more than once per cycle.

use std::collections::HashMap;
use std::fmt;

use futures::future::BoxFuture;

use crate::core::error::{CommandError, PluginError, RegistryError};
use crate::core::shell::ShellContext;
use crate::core::validate::{CommandValidator, InputGuard, ValidationReport};
use crate::models::{Category, CommandInfo, ParsedCommand};

// ============================================================================
// Command Handlers
// ============================================================================

/// Boxed handler function: parsed command in, ordered output lines out.
pub type Handler =
    Box<dyn Fn(&ParsedCommand, &mut ShellContext) -> Result<Vec<String>, CommandError> + Send + Sync>;

/// A registered command: metadata plus the handler itself.
///
/// Identity is the `name`; the registry never holds two specs under the same
/// name. Categories come from the closed [`Category`] enum, so there is no
/// dispatch hierarchy here, just a tagged record.
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub usage: Option<String>,
    pub examples: Vec<String>,
    handler: Handler,
}

impl CommandSpec {
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        handler: F,
    ) -> Self
    where
        F: Fn(&ParsedCommand, &mut ShellContext) -> Result<Vec<String>, CommandError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            category,
            usage: None,
            examples: Vec::new(),
            handler: Box::new(handler),
        }
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Documentation snapshot for `help`/`man` and completion.
    pub fn info(&self) -> CommandInfo {
        CommandInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category,
            usage: self.usage.clone(),
            examples: self.examples.clone(),
        }
    }

    pub fn run(
        &self,
        command: &ParsedCommand,
        ctx: &mut ShellContext,
    ) -> Result<Vec<String>, CommandError> {
        (self.handler)(command, ctx)
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Plugins
// ============================================================================

/// Boxed lifecycle hook. `FnOnce` by construction: a hook can only ever be
/// consumed once per register/unregister cycle.
pub type LifecycleHook = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), PluginError>> + Send>;

/// A named, independently loadable bundle of commands.
pub struct Plugin {
    pub name: String,
    pub description: String,
    pub commands: Vec<CommandSpec>,
    pub initialize: Option<LifecycleHook>,
    pub cleanup: Option<LifecycleHook>,
}

impl Plugin {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            commands: Vec::new(),
            initialize: None,
            cleanup: None,
        }
    }

    pub fn with_command(mut self, spec: CommandSpec) -> Self {
        self.commands.push(spec);
        self
    }

    pub fn on_initialize<F, Fut>(mut self, hook: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), PluginError>> + Send + 'static,
    {
        self.initialize = Some(Box::new(move || Box::pin(hook())));
        self
    }

    pub fn on_cleanup<F, Fut>(mut self, hook: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), PluginError>> + Send + 'static,
    {
        self.cleanup = Some(Box::new(move || Box::pin(hook())));
        self
    }
}

/// Lifecycle state of a registered plugin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PluginState {
    Initializing,
    Active,
    CleaningUp,
}

struct PluginRecord {
    description: String,
    contributed: Vec<String>,
    cleanup: Option<LifecycleHook>,
    state: PluginState,
}

// ============================================================================
// Registry
// ============================================================================

/// The command registry.
///
/// Created with the built-in [`InputGuard`] validator installed.
pub struct CommandRegistry {
    commands: HashMap<String, CommandSpec>,
    plugins: HashMap<String, PluginRecord>,
    validators: Vec<Box<dyn CommandValidator>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            plugins: HashMap::new(),
            validators: vec![Box::new(InputGuard)],
        }
    }

    // ------------------------------------------------------------------
    // Direct registration
    // ------------------------------------------------------------------

    /// Insert or overwrite a command by name.
    pub fn register_command(&mut self, spec: CommandSpec) {
        self.commands.insert(spec.name.clone(), spec);
    }

    /// Bulk form of [`register_command`](Self::register_command).
    pub fn register_commands(&mut self, specs: impl IntoIterator<Item = CommandSpec>) {
        for spec in specs {
            self.register_command(spec);
        }
    }

    // ------------------------------------------------------------------
    // Plugin lifecycle
    // ------------------------------------------------------------------

    /// Register a plugin bundle.
    ///
    /// Fails before any state mutation if the plugin name is taken or any of
    /// its commands collide with an existing name. Awaits `initialize` before
    /// the plugin's commands become visible; if the hook fails, nothing is
    /// registered.
    pub async fn register_plugin(&mut self, mut plugin: Plugin) -> Result<(), RegistryError> {
        if self.plugins.contains_key(&plugin.name) {
            return Err(RegistryError::DuplicatePlugin(plugin.name));
        }
        for spec in &plugin.commands {
            if self.commands.contains_key(&spec.name) {
                return Err(RegistryError::CommandConflict {
                    plugin: plugin.name,
                    command: spec.name.clone(),
                });
            }
        }

        let name = plugin.name.clone();
        let initialize = plugin.initialize.take();
        self.plugins.insert(
            name.clone(),
            PluginRecord {
                description: plugin.description.clone(),
                contributed: plugin.commands.iter().map(|s| s.name.clone()).collect(),
                cleanup: plugin.cleanup.take(),
                state: PluginState::Initializing,
            },
        );

        if let Some(hook) = initialize {
            if let Err(source) = hook().await {
                self.plugins.remove(&name);
                return Err(RegistryError::InitializeFailed {
                    plugin: name,
                    source,
                });
            }
        }

        self.register_commands(plugin.commands);
        if let Some(record) = self.plugins.get_mut(&name) {
            record.state = PluginState::Active;
        }
        Ok(())
    }

    /// Unregister a plugin, removing exactly the commands it contributed and
    /// awaiting its cleanup hook.
    ///
    /// The plugin record is dropped even when cleanup fails; the failure is
    /// still reported so callers can log it.
    pub async fn unregister_plugin(&mut self, name: &str) -> Result<(), RegistryError> {
        let known_and_active = self
            .plugins
            .get(name)
            .is_some_and(|r| r.state == PluginState::Active);
        if !known_and_active {
            return Err(RegistryError::UnknownPlugin(name.to_string()));
        }

        let record = self.plugins.get_mut(name).expect("checked above");
        record.state = PluginState::CleaningUp;
        let contributed = std::mem::take(&mut record.contributed);
        let cleanup = record.cleanup.take();

        for command in &contributed {
            self.commands.remove(command);
        }

        let result = match cleanup {
            Some(hook) => hook().await,
            None => Ok(()),
        };

        self.plugins.remove(name);
        result.map_err(|source| RegistryError::CleanupFailed {
            plugin: name.to_string(),
            source,
        })
    }

    /// Full teardown: run every pending cleanup hook exactly once, then drop
    /// all commands, plugins, and validators.
    pub async fn clear_all(&mut self) {
        let names: Vec<String> = self.plugins.keys().cloned().collect();
        for name in names {
            if let Some(record) = self.plugins.get_mut(&name) {
                record.state = PluginState::CleaningUp;
                if let Some(hook) = record.cleanup.take()
                    && let Err(err) = hook().await
                {
                    log::warn!("plugin '{name}' cleanup failed during teardown: {err}");
                }
            }
        }
        self.commands.clear();
        self.plugins.clear();
        self.validators.clear();
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn command(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    pub fn all_commands(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.values()
    }

    pub fn commands_by_category(&self, category: Category) -> Vec<&CommandSpec> {
        let mut specs: Vec<&CommandSpec> = self
            .commands
            .values()
            .filter(|s| s.category == category)
            .collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// Sorted documentation snapshot of every registered command.
    pub fn catalog(&self) -> Vec<CommandInfo> {
        let mut infos: Vec<CommandInfo> = self.commands.values().map(CommandSpec::info).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Sorted command names, for tab completion.
    pub fn command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    pub fn plugin_description(&self, name: &str) -> Option<&str> {
        self.plugins.get(name).map(|r| r.description.as_str())
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    pub fn add_validator(&mut self, validator: Box<dyn CommandValidator>) {
        self.validators.push(validator);
    }

    /// Remove a validator by name. Returns whether one was removed.
    pub fn remove_validator(&mut self, name: &str) -> bool {
        let before = self.validators.len();
        self.validators.retain(|v| v.name() != name);
        self.validators.len() != before
    }

    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// Run every validator in order and merge their reports.
    pub fn validate(&self, command: &ParsedCommand) -> ValidationReport {
        let mut merged = ValidationReport::ok();
        for validator in &self.validators {
            merged.merge(validator.validate(command));
        }
        merged
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Execute one parsed command. The single dispatch entry point.
    ///
    /// Faults raised by handlers are captured here and rendered as output
    /// lines; nothing propagates to the caller.
    pub fn execute(&self, command: &ParsedCommand, ctx: &mut ShellContext) -> Vec<String> {
        let report = self.validate(command);
        if !report.is_valid() {
            let mut lines = vec!["invalid command:".to_string()];
            lines.extend(report.errors.iter().map(|e| format!("  - {e}")));
            return lines;
        }

        let mut lines: Vec<String> = report
            .warnings
            .iter()
            .map(|w| format!("warning: {w}"))
            .collect();

        let Some(spec) = self.commands.get(&command.command) else {
            lines.push(format!(
                "{}: command not found. Type 'help' for available commands.",
                command.command
            ));
            return lines;
        };

        match spec.run(command, ctx) {
            Ok(output) => lines.extend(output),
            Err(err) => {
                log::debug!("handler '{}' failed: {err}", command.command);
                lines.push(format!("command failed: {}", command.command));
                lines.push(format!("  {err}"));
            }
        }
        lines
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
