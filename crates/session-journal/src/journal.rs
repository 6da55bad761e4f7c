//! The newest-first entry sequence owned by each widget console.

use std::collections::VecDeque;

use crate::entry::LogEntry;

/// An in-memory, newest-first sequence of [`LogEntry`] values.
///
/// Insertion is always at the head; entries are never edited or evicted.
/// The only removal is [`Journal::clear`], which empties the journal in one
/// step.
#[derive(Debug, Default)]
pub struct Journal {
    entries: VecDeque<LogEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry at the head of the journal.
    pub fn record(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate entries newest first.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    /// The most recently recorded entry, if any.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
