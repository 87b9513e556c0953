//! Plain data types shared across the shell core.

mod command;
mod filesystem;
mod session;

pub use command::{Category, CommandInfo, FlagValue, ParsedCommand};
pub use filesystem::FsNode;
pub use session::{AnimationSpeed, FontSize, Preferences, PreferencesPatch};
