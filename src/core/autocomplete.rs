//! Tab completion for command names and filesystem paths.
//!
//! The engine completes the word under the cursor:
//! - one word before the cursor: a command name, matched against the registry
//! - later words: a path, matched against the virtual filesystem
//!
//! A single match is applied immediately. Multiple matches first try the
//! longest common prefix; the full suggestion list is only revealed on a
//! "double invoke" (Tab pressed twice on identical input within a short
//! window) or when the partial word is empty.

use std::time::{Duration, Instant};

use crate::config::SUGGESTION_COLUMNS_WIDTH;
use crate::core::filesystem::VirtualFs;
use crate::core::registry::CommandRegistry;

/// Two completion requests on identical input within this window count as a
/// double invoke.
pub const DOUBLE_INVOKE_WINDOW: Duration = Duration::from_millis(500);

// ============================================================================
// Public Types
// ============================================================================

/// Result of one completion attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    /// The revised input buffer.
    pub completed: String,
    /// Candidate list, populated when `show_suggestions` is set.
    pub suggestions: Vec<String>,
    pub show_suggestions: bool,
}

impl Completion {
    fn unchanged(input: &str) -> Self {
        Self {
            completed: input.to_string(),
            suggestions: Vec::new(),
            show_suggestions: false,
        }
    }

    fn replaced(completed: String) -> Self {
        Self {
            completed,
            suggestions: Vec::new(),
            show_suggestions: false,
        }
    }

    fn suggesting(input: &str, suggestions: Vec<String>) -> Self {
        Self {
            completed: input.to_string(),
            suggestions,
            show_suggestions: true,
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Stateful completion engine.
///
/// The only state is the previous invocation (input + timestamp) used for
/// double-invoke detection. That state is engine-local, not per-session.
pub struct CompletionEngine {
    last: Option<(String, Instant)>,
}

impl CompletionEngine {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Complete the input at the given byte cursor position.
    pub fn complete(
        &mut self,
        input: &str,
        cursor: usize,
        registry: &CommandRegistry,
        fs: &VirtualFs,
        cwd: &str,
    ) -> Completion {
        self.complete_at(Instant::now(), input, cursor, registry, fs, cwd)
    }

    fn complete_at(
        &mut self,
        now: Instant,
        input: &str,
        cursor: usize,
        registry: &CommandRegistry,
        fs: &VirtualFs,
        cwd: &str,
    ) -> Completion {
        let double_invoke = matches!(
            &self.last,
            Some((prev, at)) if prev == input && now.duration_since(*at) <= DOUBLE_INVOKE_WINDOW
        );
        self.last = Some((input.to_string(), now));

        let cursor = clamp_to_char_boundary(input, cursor);
        let before = &input[..cursor];
        let after = &input[cursor..];

        let words: Vec<&str> = before.split_whitespace().collect();
        let completing_new_word = before.ends_with(char::is_whitespace);

        if words.is_empty() || (words.len() == 1 && !completing_new_word) {
            let partial = words.first().copied().unwrap_or("");
            self.complete_command(input, partial, after, double_invoke, registry)
        } else {
            let partial = if completing_new_word {
                ""
            } else {
                words.last().copied().unwrap_or("")
            };
            let fixed = &before[..before.len() - partial.len()];
            self.complete_path(input, fixed, partial, after, double_invoke, fs, cwd)
        }
    }

    fn complete_command(
        &self,
        input: &str,
        partial: &str,
        after: &str,
        double_invoke: bool,
        registry: &CommandRegistry,
    ) -> Completion {
        let matches: Vec<String> = registry
            .command_names()
            .into_iter()
            .filter(|name| name.starts_with(partial))
            .collect();

        match matches.as_slice() {
            [] => Completion::unchanged(input),
            [only] => {
                let sep = if after.starts_with(char::is_whitespace) {
                    ""
                } else {
                    " "
                };
                Completion::replaced(format!("{only}{sep}{after}"))
            }
            _ => self.resolve_multiple(input, partial, "", after, double_invoke, matches, None),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn complete_path(
        &self,
        input: &str,
        fixed: &str,
        partial: &str,
        after: &str,
        double_invoke: bool,
        fs: &VirtualFs,
        cwd: &str,
    ) -> Completion {
        // Split the partial into the directory being searched and the name
        // fragment being completed.
        let (dir_part, name_part) = match partial.rfind('/') {
            Some(idx) => (&partial[..=idx], &partial[idx + 1..]),
            None => ("", partial),
        };

        let search_dir = if dir_part.is_empty() {
            cwd.to_string()
        } else {
            VirtualFs::resolve_path(dir_part, cwd)
        };

        let Some(entries) = fs.list(&search_dir) else {
            return Completion::unchanged(input);
        };

        let matches: Vec<(String, bool)> = entries
            .iter()
            .filter(|e| e.name.starts_with(name_part))
            .map(|e| (e.name.clone(), e.is_dir))
            .collect();

        match matches.as_slice() {
            [] => Completion::unchanged(input),
            [(name, is_dir)] => {
                let suffix = if *is_dir { "/" } else { "" };
                Completion::replaced(format!("{fixed}{dir_part}{name}{suffix}{after}"))
            }
            _ => {
                let display: Vec<String> = matches
                    .iter()
                    .map(|(name, is_dir)| {
                        if *is_dir {
                            format!("{name}/")
                        } else {
                            name.clone()
                        }
                    })
                    .collect();
                let names: Vec<String> = matches.iter().map(|(n, _)| n.clone()).collect();
                self.resolve_multiple(
                    input,
                    name_part,
                    &format!("{fixed}{dir_part}"),
                    after,
                    double_invoke,
                    names,
                    Some(display),
                )
            }
        }
    }

    /// Shared multi-match logic: double invoke or an empty partial reveals
    /// the full list; otherwise try to extend via the common prefix first.
    #[allow(clippy::too_many_arguments)]
    fn resolve_multiple(
        &self,
        input: &str,
        partial: &str,
        prefix: &str,
        after: &str,
        double_invoke: bool,
        matches: Vec<String>,
        display: Option<Vec<String>>,
    ) -> Completion {
        if double_invoke || partial.is_empty() {
            return Completion::suggesting(input, display.unwrap_or(matches));
        }

        let common = longest_common_prefix(&matches);
        if common.len() > partial.len() {
            Completion::replaced(format!("{prefix}{common}{after}"))
        } else {
            Completion::suggesting(input, display.unwrap_or(matches))
        }
    }
}

impl Default for CompletionEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Suggestion Layout
// ============================================================================

/// Lay out suggestions in fixed-width columns sized to the longest entry.
pub fn format_suggestions(suggestions: &[String]) -> Vec<String> {
    if suggestions.is_empty() {
        return Vec::new();
    }

    let width = suggestions.iter().map(|s| s.chars().count()).max().unwrap_or(0) + 2;
    let per_row = (SUGGESTION_COLUMNS_WIDTH / width).max(1);

    suggestions
        .chunks(per_row)
        .map(|row| {
            let mut line = String::new();
            for entry in row {
                line.push_str(entry);
                let pad = width - entry.chars().count();
                line.extend(std::iter::repeat_n(' ', pad));
            }
            line.trim_end().to_string()
        })
        .collect()
}

// ============================================================================
// Utilities
// ============================================================================

fn clamp_to_char_boundary(input: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(input.len());
    while cursor > 0 && !input.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

fn longest_common_prefix(strings: &[String]) -> String {
    let Some(first) = strings.first() else {
        return String::new();
    };

    let mut prefix_len = first.len();
    for s in &strings[1..] {
        prefix_len = first
            .char_indices()
            .zip(s.chars())
            .take_while(|((i, a), b)| *i < prefix_len && a == b)
            .map(|((i, a), _)| i + a.len_utf8())
            .last()
            .unwrap_or(0);
    }
    first[..prefix_len].to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::builtin_commands;
    use crate::models::FsNode;

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register_commands(builtin_commands());
        registry
    }

    fn fs() -> VirtualFs {
        VirtualFs::new(
            FsNode::dir()
                .with("about.md", FsNode::file("x"))
                .with("projects", FsNode::dir().with("cli.md", FsNode::file("y")))
                .with("blog", FsNode::dir()),
        )
    }

    fn complete(engine: &mut CompletionEngine, input: &str) -> Completion {
        engine.complete(input, input.len(), &registry(), &fs(), "/")
    }

    #[test]
    fn test_single_command_match() {
        let mut engine = CompletionEngine::new();
        let result = complete(&mut engine, "he");
        assert_eq!(result.completed, "help ");
        assert!(!result.show_suggestions);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_no_match_unchanged() {
        let mut engine = CompletionEngine::new();
        let result = complete(&mut engine, "zzz");
        assert_eq!(result.completed, "zzz");
        assert!(!result.show_suggestions);
    }

    #[test]
    fn test_empty_input_lists_every_command() {
        let mut engine = CompletionEngine::new();
        let result = complete(&mut engine, "");
        assert!(result.show_suggestions);
        let names = registry().command_names();
        assert_eq!(result.suggestions, names);
        assert!(!result.suggestions.is_empty());
    }

    #[test]
    fn test_common_prefix_extension() {
        // "c" matches cat, cd, clear, contact, curl... whose common prefix
        // "c" adds nothing, so the list is shown instead.
        let mut engine = CompletionEngine::new();
        let result = complete(&mut engine, "c");
        assert!(result.show_suggestions);

        // "wh" only matches whoami.
        let result = complete(&mut engine, "wh");
        assert_eq!(result.completed, "whoami ");
    }

    #[test]
    fn test_double_invoke_reveals_list() {
        let mut engine = CompletionEngine::new();
        // "gi" extends to "git" silently... but git/github share "git".
        let first = complete(&mut engine, "gi");
        assert_eq!(first.completed, "git");
        assert!(!first.show_suggestions);

        // Same input again, immediately: show everything.
        let second = complete(&mut engine, "gi");
        assert!(second.show_suggestions);
        assert!(second.suggestions.contains(&"git".to_string()));
        assert!(second.suggestions.contains(&"github".to_string()));
    }

    #[test]
    fn test_path_completion_single_file() {
        let mut engine = CompletionEngine::new();
        let result = complete(&mut engine, "cat ab");
        assert_eq!(result.completed, "cat about.md");
    }

    #[test]
    fn test_path_completion_directory_gets_slash() {
        let mut engine = CompletionEngine::new();
        let result = complete(&mut engine, "cd pr");
        assert_eq!(result.completed, "cd projects/");
    }

    #[test]
    fn test_path_completion_nested() {
        let mut engine = CompletionEngine::new();
        let result = complete(&mut engine, "cat projects/cl");
        assert_eq!(result.completed, "cat projects/cli.md");
    }

    #[test]
    fn test_path_completion_empty_partial_lists_dir() {
        let mut engine = CompletionEngine::new();
        let result = complete(&mut engine, "ls ");
        assert!(result.show_suggestions);
        assert!(result.suggestions.contains(&"projects/".to_string()));
        assert!(result.suggestions.contains(&"about.md".to_string()));
    }

    #[test]
    fn test_cursor_mid_input() {
        let mut engine = CompletionEngine::new();
        // Cursor after "he", trailing text preserved.
        let result = engine.complete("he -x", 2, &registry(), &fs(), "/");
        assert!(result.completed.starts_with("help"));
        assert!(result.completed.ends_with("-x"));
    }

    #[test]
    fn test_format_suggestions_columns() {
        let items: Vec<String> = ["cat", "cd", "clear", "contact"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let lines = format_suggestions(&items);
        assert_eq!(lines.len(), 1);
        // Fixed-width columns sized to the longest entry ("contact" = 7 + 2).
        assert!(lines[0].starts_with("cat      cd"));
    }

    #[test]
    fn test_format_suggestions_empty() {
        assert!(format_suggestions(&[]).is_empty());
    }

    #[test]
    fn test_format_suggestions_wraps_rows() {
        let items: Vec<String> = (0..30).map(|i| format!("command-{i:02}")).collect();
        let lines = format_suggestions(&items);
        assert!(lines.len() > 1);
    }
}
