//! Bounded most-recently-used list of copied secrets.
//!
//! The list is ordered most-recent first and always has at least one slot:
//! when nothing has been copied yet it shows a single `None` placeholder.
//! Entries are identified by title, so copying a secret whose title is
//! already listed moves the existing record to the top instead of adding a
//! duplicate.

use crate::types::{RecentEntry, StoreEntry};
use tracing::debug;

/// Default number of recents kept.
pub const DEFAULT_CAPACITY: usize = 10;

/// Label shown while the list is empty.
pub const EMPTY_LABEL: &str = "None";

/// Most-recently-used tracker.
#[derive(Debug, Clone)]
pub struct RecentsTracker {
    entries: Vec<RecentEntry>,
    capacity: usize,
}

impl Default for RecentsTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RecentsTracker {
    /// Create an empty tracker. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, dropping the oldest records if the list shrinks.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.entries.truncate(self.capacity);
    }

    /// Back to the `None` placeholder.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// True while only the placeholder is shown.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of visible slots, counting the placeholder.
    pub fn len(&self) -> usize {
        self.entries.len().max(1)
    }

    /// Tracked records, most-recent first. Empty while the placeholder is shown.
    pub fn entries(&self) -> &[RecentEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&RecentEntry> {
        self.entries.get(index)
    }

    /// Menu labels, with the placeholder rendered as `None`.
    pub fn labels(&self) -> Vec<&str> {
        if self.entries.is_empty() {
            return vec![EMPTY_LABEL];
        }
        self.entries.iter().map(|e| e.title.as_str()).collect()
    }

    /// Record a successfully copied entry.
    pub fn add_recent(&mut self, entry: &StoreEntry) {
        if self.entries.is_empty() {
            self.entries.push(RecentEntry::from(entry));
            return;
        }

        if let Some(pos) = self.position(&entry.name) {
            let existing = self.entries.remove(pos);
            self.entries.insert(0, existing);
            debug!(title = %entry.name, from = pos, "promoted recent");
            return;
        }

        self.entries.insert(0, RecentEntry::from(entry));
        if self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop() {
                debug!(title = %evicted.title, "evicted recent");
            }
        }
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.title == title)
    }
}
