//! System and meta commands: help, man, history, clear, whoami.
//!
//! `help` and `man` read the [`ShellContext::catalog`] snapshot instead of
//! the registry itself, so they stay plain handlers like everything else.

use crate::config::{ASCII_PROFILE, CLEAR_SENTINEL};
use crate::core::error::CommandError;
use crate::core::registry::CommandSpec;
use crate::core::shell::ShellContext;
use crate::models::{Category, CommandInfo, ParsedCommand};

pub fn commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("help", "list available commands", Category::System, help)
            .with_usage("help [command]")
            .with_example("help")
            .with_example("help ls"),
        CommandSpec::new("man", "show the manual page for a command", Category::System, man)
            .with_usage("man COMMAND")
            .with_example("man grep"),
        CommandSpec::new("history", "show command history", Category::System, history)
            .with_usage("history [n]")
            .with_example("history 10"),
        CommandSpec::new("clear", "clear the screen", Category::System, clear)
            .with_usage("clear"),
        CommandSpec::new("whoami", "show the profile card", Category::System, whoami)
            .with_usage("whoami"),
    ]
}

// ============================================================================
// help
// ============================================================================

fn help(cmd: &ParsedCommand, ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    if let Some(name) = cmd.args.first() {
        return match find_entry(&ctx.catalog, name) {
            Some(info) => Ok(describe(info)),
            None => Ok(vec![format!("help: no such command: {name}")]),
        };
    }

    let width = ctx
        .catalog
        .iter()
        .map(|info| info.name.len())
        .max()
        .unwrap_or(0)
        + 2;

    let mut lines = vec!["Available commands:".to_string()];
    for category in Category::ALL {
        let group: Vec<&CommandInfo> = ctx
            .catalog
            .iter()
            .filter(|info| info.category == category)
            .collect();
        if group.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("{category}:"));
        for info in group {
            lines.push(format!("  {:<width$}{}", info.name, info.description));
        }
    }
    lines.push(String::new());
    lines.push("Type 'man COMMAND' for details on a command.".to_string());
    Ok(lines)
}

fn find_entry<'a>(catalog: &'a [CommandInfo], name: &str) -> Option<&'a CommandInfo> {
    catalog.iter().find(|info| info.name == name)
}

/// Compact single-command summary used by `help COMMAND`.
fn describe(info: &CommandInfo) -> Vec<String> {
    let mut lines = vec![format!("{}: {}", info.name, info.description)];
    if let Some(usage) = &info.usage {
        lines.push(format!("usage: {usage}"));
    }
    lines
}

// ============================================================================
// man
// ============================================================================

fn man(cmd: &ParsedCommand, ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    let Some(name) = cmd.args.first() else {
        return Err(CommandError::MissingOperand("man"));
    };
    let Some(info) = find_entry(&ctx.catalog, name) else {
        return Ok(vec![format!("No manual entry for {name}")]);
    };

    let mut lines = vec![
        "NAME".to_string(),
        format!("    {} - {}", info.name, info.description),
    ];
    if let Some(usage) = &info.usage {
        lines.push(String::new());
        lines.push("SYNOPSIS".to_string());
        lines.push(format!("    {usage}"));
    }
    if !info.examples.is_empty() {
        lines.push(String::new());
        lines.push("EXAMPLES".to_string());
        for example in &info.examples {
            lines.push(format!("    {example}"));
        }
    }
    Ok(lines)
}

// ============================================================================
// history / clear / whoami
// ============================================================================

fn history(cmd: &ParsedCommand, ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    let entries = ctx.session.history();

    let shown = match cmd.args.first() {
        Some(arg) => match arg.parse::<usize>() {
            Ok(n) => n.min(entries.len()),
            Err(_) => {
                return Ok(vec![format!("history: {arg}: numeric argument required")]);
            }
        },
        None => entries.len(),
    };

    // Numbering stays absolute over the full list, like bash.
    let start = entries.len() - shown;
    Ok(entries
        .iter()
        .enumerate()
        .skip(start)
        .map(|(i, entry)| format!("{:>5}  {entry}", i + 1))
        .collect())
}

fn clear(_cmd: &ParsedCommand, _ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    Ok(vec![CLEAR_SENTINEL.to_string()])
}

fn whoami(_cmd: &ParsedCommand, _ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    Ok(ASCII_PROFILE.lines().map(str::to_string).collect())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VirtualFs;
    use crate::core::parser::parse;
    use crate::core::registry::CommandRegistry;
    use crate::session::SessionStore;

    fn ctx() -> ShellContext {
        let mut registry = CommandRegistry::new();
        registry.register_commands(crate::core::commands::builtin_commands());
        let mut ctx = ShellContext::new(VirtualFs::empty(), SessionStore::in_memory());
        ctx.catalog = registry.catalog();
        ctx
    }

    #[test]
    fn test_help_groups_by_category() {
        let mut ctx = ctx();
        let lines = help(&parse("help"), &mut ctx).unwrap();
        assert_eq!(lines[0], "Available commands:");
        assert!(lines.contains(&"Navigation:".to_string()));
        assert!(lines.contains(&"System:".to_string()));
        assert!(lines.contains(&"Portfolio:".to_string()));
        assert!(lines.contains(&"Social:".to_string()));
        assert!(lines.iter().any(|l| l.trim_start().starts_with("ls")));
    }

    #[test]
    fn test_help_single_command() {
        let mut ctx = ctx();
        let lines = help(&parse("help grep"), &mut ctx).unwrap();
        assert!(lines[0].starts_with("grep: "));
        assert!(lines[1].starts_with("usage: grep"));

        let lines = help(&parse("help nope"), &mut ctx).unwrap();
        assert_eq!(lines, vec!["help: no such command: nope"]);
    }

    #[test]
    fn test_man_page_sections() {
        let mut ctx = ctx();
        let lines = man(&parse("man ls"), &mut ctx).unwrap();
        assert_eq!(lines[0], "NAME");
        assert!(lines[1].contains("ls - "));
        assert!(lines.contains(&"SYNOPSIS".to_string()));
        assert!(lines.contains(&"EXAMPLES".to_string()));
    }

    #[test]
    fn test_man_unknown_and_missing() {
        let mut ctx = ctx();
        let lines = man(&parse("man nope"), &mut ctx).unwrap();
        assert_eq!(lines, vec!["No manual entry for nope"]);

        assert!(matches!(
            man(&parse("man"), &mut ctx),
            Err(CommandError::MissingOperand("man"))
        ));
    }

    #[test]
    fn test_history_numbering_and_limit() {
        let mut ctx = ctx();
        for cmd in ["ls", "pwd", "cd projects"] {
            ctx.session.add_command(cmd);
        }

        let lines = history(&parse("history"), &mut ctx).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "    1  ls");

        let lines = history(&parse("history 2"), &mut ctx).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "    2  pwd");

        let lines = history(&parse("history many"), &mut ctx).unwrap();
        assert!(lines[0].contains("numeric argument required"));
    }

    #[test]
    fn test_clear_emits_sentinel_only() {
        let mut ctx = ctx();
        assert_eq!(
            clear(&parse("clear"), &mut ctx).unwrap(),
            vec![CLEAR_SENTINEL]
        );
    }

    #[test]
    fn test_whoami_is_profile_card() {
        let mut ctx = ctx();
        let lines = whoami(&parse("whoami"), &mut ctx).unwrap();
        assert_eq!(lines.len(), ASCII_PROFILE.lines().count());
    }
}
