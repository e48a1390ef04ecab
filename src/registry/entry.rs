//! Sink handle and state types
//!
//! This module defines what the registry stores per subscriber.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};

use super::error::SinkDeliveryError;
use crate::broadcast::Message;

/// State of a sink as seen from the registry
///
/// A sink is `Registered` until it disconnects or a push to it fails, after
/// which it is `Unregistered` for good. Delivery itself is a transient step
/// inside `Registered` and is not tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkState {
    /// Present in the registry, will receive the next broadcast
    Registered,
    /// Removed from the registry (terminal)
    Unregistered,
}

/// Sending half of a subscriber's output queue
///
/// The registry only holds this handle. The receiving half belongs to the
/// connection that created the sink, so dropping the connection closes the
/// sink no matter what the registry still holds.
///
/// Messages are queued as `Arc<Message>`, so one accepted message is shared
/// by every sink.
#[derive(Debug, Clone)]
pub struct SinkHandle {
    tx: mpsc::Sender<Arc<Message>>,
}

impl SinkHandle {
    /// Create a sink with a bounded queue of `capacity` messages
    ///
    /// A capacity of zero is treated as one.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Arc<Message>>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Push a message without waiting
    pub fn push(&self, message: Arc<Message>) -> Result<(), SinkDeliveryError> {
        self.tx.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => SinkDeliveryError::Overflow,
            TrySendError::Closed(_) => SinkDeliveryError::Closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(seq: u64, text: &str) -> Arc<Message> {
        Arc::new(Message::new(seq, text.to_string()))
    }

    #[tokio::test]
    async fn test_push_and_receive() {
        let (sink, mut rx) = SinkHandle::channel(4);

        sink.push(message(1, "a")).unwrap();
        sink.push(message(2, "b")).unwrap();

        assert_eq!(rx.recv().await.unwrap().text, "a");
        assert_eq!(rx.recv().await.unwrap().text, "b");
    }

    #[test]
    fn test_push_shares_message() {
        let (sink, mut rx) = SinkHandle::channel(1);
        let shared = message(1, "a");

        sink.push(Arc::clone(&shared)).unwrap();

        assert!(Arc::ptr_eq(&rx.try_recv().unwrap(), &shared));
    }

    #[test]
    fn test_push_overflow() {
        let (sink, _rx) = SinkHandle::channel(1);

        sink.push(message(1, "a")).unwrap();
        assert_eq!(sink.push(message(2, "b")), Err(SinkDeliveryError::Overflow));
    }

    #[test]
    fn test_push_closed() {
        let (sink, rx) = SinkHandle::channel(1);
        drop(rx);

        assert_eq!(sink.push(message(1, "a")), Err(SinkDeliveryError::Closed));
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let (sink, _rx) = SinkHandle::channel(0);

        assert!(sink.push(message(1, "a")).is_ok());
    }
}
