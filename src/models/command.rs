//! Data types shared by the parser, registry, and completion engine.

use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Flag Values
// ============================================================================

/// Value carried by a parsed flag.
///
/// Bare flags (`-l`, `--verbose`) are boolean; `--name=value` flags carry the
/// value as a string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    Str(String),
}

impl FlagValue {
    /// Whether the flag counts as "set" for boolean-style checks.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Str(_) => true,
        }
    }

    /// String payload of a `--name=value` flag, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Bool(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

// ============================================================================
// ParsedCommand
// ============================================================================

/// Structured result of tokenizing one raw input line.
///
/// Produced by [`crate::core::parser::parse`] and treated as immutable from
/// then on. The original line is kept verbatim in `raw_input` for error
/// messages and for handlers that need to re-inspect their own options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// The command verb (empty string for blank input).
    pub command: String,
    /// Positional arguments, in order.
    pub args: Vec<String>,
    /// Flags keyed by name. Keys are unique within one parse.
    pub flags: BTreeMap<String, FlagValue>,
    /// The raw input line, preserved verbatim.
    pub raw_input: String,
}

impl ParsedCommand {
    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }

    /// Check whether a boolean flag is present and set.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.get(name).is_some_and(FlagValue::is_set)
    }

    /// Get the string value of a `--name=value` flag.
    pub fn flag_value(&self, name: &str) -> Option<&str> {
        self.flags.get(name).and_then(FlagValue::as_str)
    }
}

// ============================================================================
// Command Categories
// ============================================================================

/// Closed set of command categories used for `help` grouping and lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    System,
    Navigation,
    Portfolio,
    Social,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [
        Category::Navigation,
        Category::System,
        Category::Portfolio,
        Category::Social,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Navigation => "Navigation",
            Self::Portfolio => "Portfolio",
            Self::Social => "Social",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Command Catalog Entries
// ============================================================================

/// Documentation-only snapshot of a registered command.
///
/// The registry produces these for `help`, `man`, and tab completion so
/// handlers never need a reference back into the registry itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub usage: Option<String>,
    pub examples: Vec<String>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_value_is_set() {
        assert!(FlagValue::Bool(true).is_set());
        assert!(!FlagValue::Bool(false).is_set());
        assert!(FlagValue::Str("x".to_string()).is_set());
    }

    #[test]
    fn test_flag_accessors() {
        let mut cmd = ParsedCommand::default();
        cmd.flags
            .insert("l".to_string(), FlagValue::Bool(true));
        cmd.flags
            .insert("name".to_string(), FlagValue::Str("val".to_string()));

        assert!(cmd.has_flag("l"));
        assert!(cmd.has_flag("name"));
        assert!(!cmd.has_flag("a"));
        assert_eq!(cmd.flag_value("name"), Some("val"));
        assert_eq!(cmd.flag_value("l"), None);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Navigation.to_string(), "Navigation");
        assert_eq!(Category::ALL.len(), 4);
    }
}
