//! File inspection commands: ls, cat, grep.

use regex::Regex;

use crate::core::error::CommandError;
use crate::core::filesystem::{DirEntry, VirtualFs};
use crate::core::registry::CommandSpec;
use crate::core::shell::ShellContext;
use crate::models::{Category, ParsedCommand};
use crate::utils::format;

pub fn commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("ls", "list directory contents", Category::Navigation, ls)
            .with_usage("ls [-l] [-a] [path]")
            .with_example("ls -la /")
            .with_example("ls projects"),
        CommandSpec::new("cat", "print file contents", Category::Navigation, cat)
            .with_usage("cat FILE...")
            .with_example("cat about.md"),
        CommandSpec::new("grep", "search file contents", Category::Navigation, grep)
            .with_usage("grep [-i] PATTERN [FILE]")
            .with_example("grep -i rust skills.md")
            .with_example("grep terminal"),
    ]
}

// ============================================================================
// ls
// ============================================================================

fn ls(cmd: &ParsedCommand, ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    let long = cmd.has_flag("l");
    let all = cmd.has_flag("a") || cmd.has_flag("all");

    let target = cmd.args.first().map(String::as_str).unwrap_or(".");
    let resolved = VirtualFs::resolve_path(target, &ctx.cwd);

    let Some(node) = ctx.fs.node(&resolved) else {
        return Ok(vec![format!(
            "ls: cannot access '{target}': No such file or directory"
        )]);
    };
    if !node.is_directory() {
        return Ok(vec![format!(
            "ls: cannot access '{target}': Not a directory"
        )]);
    }

    // list() on a known directory always succeeds.
    let mut entries: Vec<DirEntry> = ctx
        .fs
        .list(&resolved)
        .unwrap_or_default()
        .into_iter()
        .filter(|e| all || !e.name.starts_with('.'))
        .collect();

    if all {
        // Synthetic self/parent entries, shown first like real ls -a.
        let synthetic = |name: &str| DirEntry {
            name: name.to_string(),
            is_dir: true,
            size: 4096,
        };
        entries.insert(0, synthetic(".."));
        entries.insert(0, synthetic("."));
    }

    if long {
        let mut lines = vec![format!("total {}", entries.len())];
        lines.extend(entries.iter().map(format::long_entry));
        Ok(lines)
    } else if entries.is_empty() {
        Ok(Vec::new())
    } else {
        Ok(vec![format::short_listing(&entries)])
    }
}

// ============================================================================
// cat
// ============================================================================

fn cat(cmd: &ParsedCommand, ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    if cmd.args.is_empty() {
        return Err(CommandError::MissingOperand("cat"));
    }

    let mut lines = Vec::new();
    for arg in &cmd.args {
        let resolved = VirtualFs::resolve_path(arg, &ctx.cwd);
        match ctx.fs.node(&resolved) {
            Some(node) if node.is_directory() => {
                lines.push(format!("cat: {arg}: Is a directory"));
            }
            Some(node) => {
                lines.extend(node.lines().unwrap_or_default().iter().cloned());
            }
            None => lines.push(format!("cat: {arg}: No such file or directory")),
        }
    }
    Ok(lines)
}

// ============================================================================
// grep
// ============================================================================

fn grep(cmd: &ParsedCommand, ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    let Some(pattern) = cmd.args.first() else {
        return Err(CommandError::MissingOperand("grep"));
    };

    let source = if cmd.has_flag("i") {
        format!("(?i){pattern}")
    } else {
        pattern.clone()
    };
    let Ok(regex) = Regex::new(&source) else {
        return Ok(vec![format!("grep: invalid pattern '{pattern}'")]);
    };

    match cmd.args.get(1) {
        Some(file) => {
            let resolved = VirtualFs::resolve_path(file, &ctx.cwd);
            match ctx.fs.node(&resolved) {
                Some(node) if node.is_directory() => {
                    Ok(vec![format!("grep: {file}: Is a directory")])
                }
                Some(node) => Ok(node
                    .lines()
                    .unwrap_or_default()
                    .iter()
                    .filter(|line| regex.is_match(line))
                    .cloned()
                    .collect()),
                None => Ok(vec![format!("grep: {file}: No such file or directory")]),
            }
        }
        // No file: search every file of the working directory, with the
        // file name prefixed the way grep does for multiple inputs.
        None => {
            let mut lines = Vec::new();
            for entry in ctx.fs.list(&ctx.cwd).unwrap_or_default() {
                if entry.is_dir {
                    continue;
                }
                let path = VirtualFs::resolve_path(&entry.name, &ctx.cwd);
                if let Some(node) = ctx.fs.node(&path) {
                    for line in node.lines().unwrap_or_default() {
                        if regex.is_match(line) {
                            lines.push(format!("{}:{line}", entry.name));
                        }
                    }
                }
            }
            Ok(lines)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
