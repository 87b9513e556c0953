//! Built-in command catalog.
//!
//! Each submodule contributes a group of [`CommandSpec`]s:
//! - `navigation`: cd, pwd, find, tree
//! - `files`: ls, cat, grep
//! - `system`: help, man, history, clear, whoami
//! - `network`: curl, ssh, ping, git, wget (canned transcripts, no real I/O)
//! - `portfolio`: about, projects, skills, contact, github
//!
//! Handlers report user-level failures ("no such file") as ordinary output
//! lines in the usual unix phrasing; [`CommandError`] is reserved for faults
//! like a missing operand, which the registry renders at the dispatch
//! boundary.

mod files;
mod navigation;
mod network;
mod portfolio;
mod system;

use crate::core::registry::CommandSpec;

/// The full built-in catalog, ready for bulk registration.
pub fn builtin_commands() -> Vec<CommandSpec> {
    let mut specs = Vec::new();
    specs.extend(navigation::commands());
    specs.extend(files::commands());
    specs.extend(system::commands());
    specs.extend(network::commands());
    specs.extend(portfolio::commands());
    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names_are_unique() {
        let specs = builtin_commands();
        let names: HashSet<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), specs.len());
    }

    #[test]
    fn test_catalog_covers_expected_commands() {
        let specs = builtin_commands();
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        for expected in [
            "cd", "pwd", "find", "tree", "ls", "cat", "grep", "help", "man", "history", "clear",
            "whoami", "curl", "ssh", "ping", "git", "wget", "about", "projects", "skills",
            "contact", "github",
        ] {
            assert!(names.contains(&expected), "missing command {expected}");
        }
    }

    #[test]
    fn test_every_command_has_description() {
        for spec in builtin_commands() {
            assert!(!spec.description.is_empty(), "{} lacks description", spec.name);
        }
    }
}
