//! Shared message log primitives for CLI and future UIs.
use std::{
    collections::VecDeque,
    time::{SystemTime, UNIX_EPOCH},
};

use strum::Display;

/// Channel a message belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MessageKind {
    /// Join, move, tick and other session feedback.
    System,
    /// Attacks, damage, deaths.
    Combat,
    /// Player or NPC speech.
    Radio,
}

/// Snapshot of a single message entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEntry {
    pub text: String,
    /// Seconds since the Unix epoch.
    pub timestamp: Option<u64>,
    pub kind: MessageKind,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>, timestamp: Option<u64>, kind: MessageKind) -> Self {
        Self {
            text: text.into(),
            timestamp,
            kind,
        }
    }

    fn now(text: impl Into<String>, kind: MessageKind) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .map(|elapsed| elapsed.as_secs());
        Self::new(text, timestamp, kind)
    }
}

/// Append-only circular buffer of messages displayed to the player.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    pub fn push(&mut self, entry: MessageEntry) {
        tracing::info!(kind = %entry.kind, "{}", entry.text);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn push_system(&mut self, text: impl Into<String>) {
        self.push(MessageEntry::now(text, MessageKind::System));
    }

    pub fn push_combat(&mut self, text: impl Into<String>) {
        self.push(MessageEntry::now(text, MessageKind::Combat));
    }

    pub fn push_radio(&mut self, text: impl Into<String>) {
        self.push(MessageEntry::now(text, MessageKind::Radio));
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn last(&self) -> Option<&MessageEntry> {
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_oldest_when_full() {
        let mut log = MessageLog::new(2);
        log.push_system("one");
        log.push_combat("two");
        log.push_radio("three");

        let texts: Vec<_> = log.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["two", "three"]);
        assert_eq!(log.last().map(|e| e.kind), Some(MessageKind::Radio));
    }

    #[test]
    fn recent_is_newest_first() {
        let mut log = MessageLog::new(8);
        for text in ["a", "b", "c"] {
            log.push_system(text);
        }
        let texts: Vec<_> = log.recent(2).map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["c", "b"]);
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let mut log = MessageLog::new(0);
        log.push_system("a");
        log.push_system("b");
        assert_eq!(log.len(), 1);
    }
}
