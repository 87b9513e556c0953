//! Small shared utilities.

pub mod format;
pub mod history;

pub use history::HistoryBuffer;
