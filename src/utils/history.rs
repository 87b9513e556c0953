//! Capped command-history buffer.
//!
//! Holds the most recent command lines, oldest first. Pushes are O(1); when
//! the buffer reaches capacity the oldest entry is dropped. Blank lines and
//! immediate repeats are rejected at the push boundary so every caller gets
//! the same retention rules.

use std::collections::VecDeque;

#[derive(Clone, Debug)]
pub struct HistoryBuffer {
    entries: VecDeque<String>,
    capacity: usize,
}

impl HistoryBuffer {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "HistoryBuffer capacity must be greater than 0");
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Seed the buffer from previously persisted entries, keeping only the
    /// most recent `capacity` of them.
    pub fn from_entries(capacity: usize, entries: impl IntoIterator<Item = String>) -> Self {
        let mut buffer = Self::new(capacity);
        for entry in entries {
            buffer.force_push(entry);
        }
        buffer
    }

    /// Append a command line. Returns `false` (and stores nothing) for blank
    /// input or an exact repeat of the newest entry.
    pub fn push(&mut self, entry: &str) -> bool {
        if entry.trim().is_empty() {
            return false;
        }
        if self.entries.back().is_some_and(|last| last == entry) {
            return false;
        }
        self.force_push(entry.to_string());
        true
    }

    fn force_push(&mut self, entry: String) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Change the cap, dropping oldest entries if the buffer shrinks.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_order() {
        let mut buffer = HistoryBuffer::new(5);
        assert!(buffer.push("ls"));
        assert!(buffer.push("pwd"));
        assert_eq!(buffer.to_vec(), vec!["ls", "pwd"]);
        assert_eq!(buffer.last(), Some("pwd"));
    }

    #[test]
    fn test_blank_rejected() {
        let mut buffer = HistoryBuffer::new(5);
        assert!(!buffer.push(""));
        assert!(!buffer.push("   "));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_immediate_repeat_rejected() {
        let mut buffer = HistoryBuffer::new(5);
        assert!(buffer.push("ls"));
        assert!(!buffer.push("ls"));
        assert!(buffer.push("pwd"));
        // Non-immediate repeats are fine.
        assert!(buffer.push("ls"));
        assert_eq!(buffer.to_vec(), vec!["ls", "pwd", "ls"]);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut buffer = HistoryBuffer::new(3);
        for cmd in ["a", "b", "c", "d", "e"] {
            buffer.push(cmd);
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.to_vec(), vec!["c", "d", "e"]);
    }

    #[test]
    fn test_from_entries_truncates_to_recent() {
        let entries = (0..10).map(|i| format!("cmd{i}"));
        let buffer = HistoryBuffer::from_entries(4, entries);
        assert_eq!(buffer.to_vec(), vec!["cmd6", "cmd7", "cmd8", "cmd9"]);
    }

    #[test]
    fn test_shrink_capacity() {
        let mut buffer = HistoryBuffer::new(5);
        for cmd in ["a", "b", "c", "d"] {
            buffer.push(cmd);
        }
        buffer.set_capacity(2);
        assert_eq!(buffer.to_vec(), vec!["c", "d"]);
        assert_eq!(buffer.capacity(), 2);
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than 0")]
    fn test_zero_capacity_panics() {
        let _ = HistoryBuffer::new(0);
    }
}
