//! Navigation commands: cd, pwd, find, tree.

use regex::Regex;

use crate::core::error::CommandError;
use crate::core::filesystem::VirtualFs;
use crate::core::registry::CommandSpec;
use crate::core::shell::ShellContext;
use crate::models::{Category, ParsedCommand};

pub fn commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("cd", "change the working directory", Category::Navigation, cd)
            .with_usage("cd [dir]")
            .with_example("cd projects")
            .with_example("cd .."),
        CommandSpec::new("pwd", "print the working directory", Category::Navigation, pwd)
            .with_usage("pwd"),
        CommandSpec::new("find", "search for files and directories", Category::Navigation, find)
            .with_usage("find [path] [-name PATTERN] [-type f|d]")
            .with_example("find / -name *.md")
            .with_example("find projects -type f"),
        CommandSpec::new("tree", "list the directory tree", Category::Navigation, tree)
            .with_usage("tree [dir]")
            .with_example("tree /"),
    ]
}

// ============================================================================
// cd / pwd
// ============================================================================

fn cd(cmd: &ParsedCommand, ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    let target = cmd.args.first().map(String::as_str).unwrap_or("~");
    let resolved = VirtualFs::resolve_path(target, &ctx.cwd);

    match ctx.fs.node(&resolved) {
        Some(node) if node.is_directory() => {
            ctx.cwd = resolved;
            Ok(Vec::new())
        }
        Some(_) => Ok(vec![format!("cd: not a directory: {target}")]),
        None => Ok(vec![format!("cd: no such file or directory: {target}")]),
    }
}

fn pwd(_cmd: &ParsedCommand, ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    Ok(vec![ctx.cwd.clone()])
}

// ============================================================================
// find
// ============================================================================

#[derive(Default)]
struct FindQuery {
    path: Option<String>,
    name: Option<String>,
    kind: Option<char>,
}

/// Parse find's predicate syntax from the raw line.
///
/// `-name` and `-type` look like short-flag clusters to the generic parser,
/// so find re-tokenizes `raw_input` itself.
fn parse_find(raw: &str) -> Result<FindQuery, String> {
    let mut query = FindQuery::default();
    let mut tokens = raw.split_whitespace().skip(1);

    while let Some(token) = tokens.next() {
        match token {
            "-name" => match tokens.next() {
                Some(pattern) => query.name = Some(pattern.to_string()),
                None => return Err("find: missing argument to '-name'".to_string()),
            },
            "-type" => match tokens.next() {
                Some("f") => query.kind = Some('f'),
                Some("d") => query.kind = Some('d'),
                Some(other) => {
                    return Err(format!("find: invalid argument '{other}' to '-type'"));
                }
                None => return Err("find: missing argument to '-type'".to_string()),
            },
            _ if token.starts_with('-') => {
                return Err(format!("find: unknown predicate '{token}'"));
            }
            _ => {
                if query.path.is_none() {
                    query.path = Some(token.to_string());
                }
            }
        }
    }
    Ok(query)
}

/// Translate a shell glob (`*`, `?`) into an anchored regex.
fn glob_to_regex(glob: &str) -> Regex {
    let mut pattern = String::from("^");
    let mut literal = String::new();
    for c in glob.chars() {
        match c {
            '*' | '?' => {
                pattern.push_str(&regex::escape(&literal));
                literal.clear();
                pattern.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    pattern.push_str(&regex::escape(&literal));
    pattern.push('$');
    // Escaped globs only contain valid syntax.
    Regex::new(&pattern).unwrap_or_else(|_| Regex::new("^$").unwrap())
}

fn find(cmd: &ParsedCommand, ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    let query = match parse_find(&cmd.raw_input) {
        Ok(query) => query,
        Err(message) => return Ok(vec![message]),
    };

    let start_arg = query.path.as_deref().unwrap_or(".");
    let start = VirtualFs::resolve_path(start_arg, &ctx.cwd);
    if ctx.fs.node(&start).is_none() {
        return Ok(vec![format!(
            "find: '{start_arg}': No such file or directory"
        )]);
    }

    let matcher = query.name.as_deref().map(glob_to_regex);
    let mut lines = Vec::new();
    ctx.fs.walk(&start, &mut |path, node| {
        if let Some(kind) = query.kind {
            let want_dir = kind == 'd';
            if node.is_directory() != want_dir {
                return;
            }
        }
        if let Some(regex) = &matcher {
            let name = path.rsplit('/').next().unwrap_or("");
            // The root has an empty final segment; only named nodes match.
            if name.is_empty() || !regex.is_match(name) {
                return;
            }
        }
        lines.push(path.to_string());
    });
    Ok(lines)
}

// ============================================================================
// tree
// ============================================================================

fn tree(cmd: &ParsedCommand, ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    let target = cmd.args.first().map(String::as_str).unwrap_or(".");
    let root = VirtualFs::resolve_path(target, &ctx.cwd);
    if !ctx.fs.is_directory(&root) {
        return Ok(vec![format!("tree: {target}: No such directory")]);
    }

    let mut lines = vec![root.clone()];
    let mut dirs = 0usize;
    let mut files = 0usize;
    render_branch(ctx, &root, "", &mut lines, &mut dirs, &mut files);
    lines.push(String::new());
    lines.push(format!("{dirs} directories, {files} files"));
    Ok(lines)
}

fn render_branch(
    ctx: &ShellContext,
    path: &str,
    indent: &str,
    lines: &mut Vec<String>,
    dirs: &mut usize,
    files: &mut usize,
) {
    let Some(entries) = ctx.fs.list(path) else {
        return;
    };

    let count = entries.len();
    for (i, entry) in entries.iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        lines.push(format!("{indent}{connector}{}", entry.name));

        if entry.is_dir {
            *dirs += 1;
            let child = if path == "/" {
                format!("/{}", entry.name)
            } else {
                format!("{path}/{}", entry.name)
            };
            let child_indent = format!("{indent}{}", if last { "    " } else { "│   " });
            render_branch(ctx, &child, &child_indent, lines, dirs, files);
        } else {
            *files += 1;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
