//! Shared message log primitives for CLI and future UIs.
use std::collections::VecDeque;

use battle_core::Tick;

/// Severity level for UI messages produced from runtime events.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// Snapshot of a single message entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEntry {
    pub text: String,
    pub timestamp: Option<Tick>,
    pub level: MessageLevel,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>, timestamp: Option<Tick>, level: MessageLevel) -> Self {
        Self {
            text: text.into(),
            timestamp,
            level,
        }
    }
}

/// Circular buffer of messages displayed to the player.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
    pushed: u64,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
            pushed: 0,
        }
    }

    pub fn push(&mut self, entry: MessageEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        self.pushed += 1;
    }

    pub fn push_text(&mut self, message: impl Into<String>) {
        self.push(MessageEntry::new(message, None, MessageLevel::Info));
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn latest(&self) -> Option<&MessageEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages ever pushed, including evicted ones. Lets a renderer tell
    /// which entries it has not printed yet.
    pub fn total_pushed(&self) -> u64 {
        self.pushed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_oldest_when_full() {
        let mut log = MessageLog::new(2);
        log.push_text("first");
        log.push_text("second");
        log.push_text("third");

        let texts: Vec<_> = log.iter().map(|entry| entry.text.as_str()).collect();
        assert_eq!(texts, ["second", "third"]);

        let recent: Vec<_> = log.recent(5).map(|entry| entry.text.as_str()).collect();
        assert_eq!(recent, ["third", "second"]);
        assert_eq!(log.total_pushed(), 3);
    }

    #[test]
    fn zero_capacity_keeps_one_entry() {
        let mut log = MessageLog::new(0);
        log.push_text("only");
        log.push_text("latest");
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().map(|entry| entry.text.as_str()), Some("latest"));
    }
}
