//! Pre-dispatch command validation.
//!
//! Validators run in registration order before every dispatch; their reports
//! are merged by concatenation. Any error blocks dispatch entirely, warnings
//! are prepended to the eventual output.

use crate::models::ParsedCommand;

/// Maximum accepted length of the command verb, in characters.
pub const MAX_COMMAND_LEN: usize = 100;

/// Shell metacharacters associated with injection attempts.
const FORBIDDEN_CHARS: &[char] = &[';', '&', '|', '`', '$', '(', ')'];

// ============================================================================
// Validation Report
// ============================================================================

/// Outcome of one validator, or of the merged validator chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
            warnings: Vec::new(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            errors: Vec::new(),
            warnings: vec![message.into()],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Append another report, preserving order.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

// ============================================================================
// Validator Trait
// ============================================================================

/// A pre-dispatch gate that can reject a parsed command.
pub trait CommandValidator: Send + Sync {
    /// Stable name, used to remove the validator again.
    fn name(&self) -> &str;

    fn validate(&self, command: &ParsedCommand) -> ValidationReport;
}

// ============================================================================
// Built-in Validator
// ============================================================================

/// The registry's built-in input gate.
///
/// Rejects empty commands, over-long commands, and shell metacharacters in
/// the command verb. Only the verb is inspected, not the arguments: the
/// filesystem is simulated and nothing is ever passed to a real shell.
pub struct InputGuard;

impl CommandValidator for InputGuard {
    fn name(&self) -> &str {
        "input-guard"
    }

    fn validate(&self, command: &ParsedCommand) -> ValidationReport {
        let mut report = ValidationReport::ok();

        if command.command.is_empty() {
            report.errors.push("empty command".to_string());
            return report;
        }

        if command.command.chars().count() > MAX_COMMAND_LEN {
            report.errors.push(format!(
                "command exceeds {MAX_COMMAND_LEN} characters"
            ));
        }

        if let Some(c) = command.command.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
            report
                .errors
                .push(format!("command contains forbidden character '{c}'"));
        }

        report
    }
}

// ============================================================================
// Tests
// ============================================================================
