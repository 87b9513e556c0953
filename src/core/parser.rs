//! Command-line parser.
//!
//! Splits a raw input line into a [`ParsedCommand`]: the first
//! whitespace-separated token is the command verb, `--name[=value]` tokens
//! become long flags, `-abc` tokens become clusters of single-letter boolean
//! flags, and everything else is a positional argument.
//!
//! Parsing is total and pure: no input ever raises, the worst case is an
//! empty command, and the same string always yields the same result. Both
//! the dispatcher and the tab-completion engine rely on that.

use std::collections::BTreeMap;

use crate::models::{FlagValue, ParsedCommand};

/// Parse one raw input line.
pub fn parse(raw: &str) -> ParsedCommand {
    let mut tokens = raw.split_whitespace();

    let command = tokens.next().unwrap_or_default().to_string();
    let mut args = Vec::new();
    let mut flags: BTreeMap<String, FlagValue> = BTreeMap::new();

    for token in tokens {
        if let Some(long) = token.strip_prefix("--") {
            if long.is_empty() {
                // A bare "--" has no flag name; treat it as positional.
                args.push(token.to_string());
            } else if let Some((name, value)) = long.split_once('=') {
                flags.insert(name.to_string(), FlagValue::Str(value.to_string()));
            } else {
                flags.insert(long.to_string(), FlagValue::Bool(true));
            }
        } else if token.len() > 1 && token.starts_with('-') {
            // Short-flag cluster: -la sets both 'l' and 'a'.
            for c in token.chars().skip(1) {
                flags.insert(c.to_string(), FlagValue::Bool(true));
            }
        } else {
            args.push(token.to_string());
        }
    }

    ParsedCommand {
        command,
        args,
        flags,
        raw_input: raw.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
