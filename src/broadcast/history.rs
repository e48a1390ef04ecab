//! Message history
//!
//! Append-only log of accepted messages, optionally bounded.

use std::collections::VecDeque;
use std::sync::Arc;

use super::message::Message;

/// Ordered message history
///
/// Unbounded unless a capacity is set, in which case the oldest messages are
/// evicted first.
#[derive(Debug)]
pub struct History {
    messages: VecDeque<Arc<Message>>,
    capacity: Option<usize>,
    next_seq: u64,
}

impl History {
    /// Create an unbounded history
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// Create a history holding at most `capacity` messages
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            messages: VecDeque::new(),
            capacity: capacity.map(|c| c.max(1)),
            next_seq: 1,
        }
    }

    /// Append a message, assigning the next sequence number
    pub fn push(&mut self, text: String) -> Arc<Message> {
        let message = Arc::new(Message::new(self.next_seq, text));
        self.next_seq += 1;

        self.messages.push_back(Arc::clone(&message));

        if let Some(capacity) = self.capacity {
            while self.messages.len() > capacity {
                self.messages.pop_front();
            }
        }

        message
    }

    /// Every retained message in arrival order
    pub fn messages(&self) -> Vec<Arc<Message>> {
        self.messages.iter().cloned().collect()
    }

    /// Retained message texts in arrival order
    pub fn texts(&self) -> Vec<String> {
        self.messages.iter().map(|m| m.text.clone()).collect()
    }

    /// Number of retained messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if no messages are retained
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Sequence number the most recent message got, 0 if none yet
    pub fn last_seq(&self) -> u64 {
        self.next_seq - 1
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_sequence() {
        let mut history = History::new();

        let a = history.push("a".into());
        let b = history.push("b".into());

        assert_eq!(a.seq, 1);
        assert_eq!(b.seq, 2);
        assert_eq!(history.last_seq(), 2);
        assert_eq!(history.texts(), vec!["a", "b"]);
    }

    #[test]
    fn test_bounded_evicts_oldest() {
        let mut history = History::with_capacity(Some(2));

        history.push("one".into());
        history.push("two".into());
        let three = history.push("three".into());

        assert_eq!(history.len(), 2);
        assert_eq!(history.texts(), vec!["two", "three"]);
        // Sequence keeps counting across evictions
        assert_eq!(three.seq, 3);
        assert_eq!(history.messages()[0].seq, 2);
    }

    #[test]
    fn test_empty_history() {
        let history = History::default();

        assert!(history.is_empty());
        assert_eq!(history.last_seq(), 0);
        assert!(history.messages().is_empty());
    }
}
