use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of entries kept in the recent-activity feed.
pub const DEFAULT_ACTIVITY_CAPACITY: usize = 5;

/// What an activity entry is about, derived from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Deposit,
    Withdrawal,
    LowBalance,
}

impl ActivityKind {
    /// Classify an entry by its leading character: "Added…", "Subtracted…",
    /// anything else is treated as a low-balance notice.
    pub fn classify(text: &str) -> Self {
        match text.chars().next() {
            Some('A') => ActivityKind::Deposit,
            Some('S') => ActivityKind::Withdrawal,
            _ => ActivityKind::LowBalance,
        }
    }
}

/// One line in the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

impl ActivityEntry {
    pub fn new(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> ActivityKind {
        ActivityKind::classify(&self.text)
    }
}

/// Append-and-evict feed capped at a fixed number of entries.
///
/// Stored oldest-first; `newest_first` gives the display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ACTIVITY_CAPACITY)
    }

    /// Create an empty log. A capacity of 0 is bumped to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append `entry` as the most recent one, evicting the single oldest
    /// entry if the log grows past capacity. Returns the evicted entry.
    pub fn append(&mut self, entry: ActivityEntry) -> Option<ActivityEntry> {
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    /// Change the cap, dropping the oldest entries that no longer fit.
    /// Returns how many entries were dropped.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity.max(1);
        let excess = self.entries.len().saturating_sub(self.capacity);
        self.entries.drain(..excess);
        excess
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

    /// Entries in storage order (oldest first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    /// Entries for display, most recent first.
    pub fn newest_first(&self) -> Vec<&ActivityEntry> {
        self.entries.iter().rev().collect()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}
