//! Portfolio and social commands: about, projects, skills, contact, github.
//!
//! The portfolio commands read their content from the virtual filesystem, so
//! `about` and `cat about.md` always agree.

use crate::core::error::CommandError;
use crate::core::registry::CommandSpec;
use crate::core::shell::ShellContext;
use crate::models::{Category, ParsedCommand};

pub fn commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("about", "who runs this site", Category::Portfolio, about)
            .with_usage("about"),
        CommandSpec::new("projects", "list featured projects", Category::Portfolio, projects)
            .with_usage("projects"),
        CommandSpec::new("skills", "languages and tools", Category::Portfolio, skills)
            .with_usage("skills"),
        CommandSpec::new("contact", "how to reach me", Category::Social, contact)
            .with_usage("contact"),
        CommandSpec::new("github", "link to the GitHub profile", Category::Social, github)
            .with_usage("github"),
    ]
}

/// Read a content file from the filesystem, with a stable fallback line when
/// the file is absent (for instance over an empty test filesystem).
fn page(ctx: &ShellContext, path: &str) -> Vec<String> {
    match ctx.fs.node(path).and_then(|node| node.lines()) {
        Some(lines) => lines.to_vec(),
        None => vec![format!("content unavailable: {path}")],
    }
}

fn about(_cmd: &ParsedCommand, ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    Ok(page(ctx, "/about.md"))
}

fn skills(_cmd: &ParsedCommand, ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    Ok(page(ctx, "/skills.md"))
}

fn projects(_cmd: &ParsedCommand, ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    let Some(entries) = ctx.fs.list("/projects") else {
        return Ok(vec!["content unavailable: /projects".to_string()]);
    };

    let mut lines = vec!["Projects:".to_string(), String::new()];
    for entry in entries.iter().filter(|e| !e.is_dir) {
        let path = format!("/projects/{}", entry.name);
        // First line of each project file is its markdown title.
        let title = ctx
            .fs
            .node(&path)
            .and_then(|node| node.lines())
            .and_then(|lines| lines.first())
            .map(|line| line.trim_start_matches('#').trim().to_string())
            .unwrap_or_default();
        lines.push(format!("  {:<16}{title}", entry.name));
    }
    lines.push(String::new());
    lines.push("Read one with: cat projects/NAME".to_string());
    Ok(lines)
}

fn contact(_cmd: &ParsedCommand, _ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    Ok(vec![
        "email    hello@folio.dev".to_string(),
        "github   https://github.com/foliosh".to_string(),
        "rss      https://folio.dev/feed.xml".to_string(),
    ])
}

fn github(_cmd: &ParsedCommand, _ctx: &mut ShellContext) -> Result<Vec<String>, CommandError> {
    Ok(vec![
        "https://github.com/foliosh".to_string(),
        "(open it in a browser; this shell stays offline)".to_string(),
    ])
}

// ============================================================================
// Tests
// ============================================================================
