//! Message broadcaster
//!
//! Owns the history and fans every accepted message out to the registry.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use super::history::History;
use super::message::{stamp_text, Message};
use crate::registry::ClientRegistry;
use crate::relay::RelayConfig;
use crate::stats::RelayMetrics;

/// Outcome of one fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Sinks the message was queued on
    pub delivered: usize,
    /// Sinks that failed and were unregistered
    pub dropped: usize,
}

/// Appends messages to history and delivers them to every registered sink
///
/// `append` holds the history lock for the whole of push + fan-out, so two
/// concurrent appends can never reach sinks in different orders. Pushes are
/// non-blocking (`try_send` into bounded queues), which keeps the critical
/// section short no matter how slow a subscriber is.
pub struct MessageBroadcaster {
    registry: Arc<ClientRegistry>,
    history: Mutex<History>,
    stamp_messages: bool,
    metrics: Arc<RelayMetrics>,
}

impl MessageBroadcaster {
    /// Create a broadcaster with default configuration
    pub fn with_registry(registry: Arc<ClientRegistry>) -> Self {
        Self::new(
            registry,
            &RelayConfig::default(),
            Arc::new(RelayMetrics::new()),
        )
    }

    /// Create a broadcaster
    pub fn new(
        registry: Arc<ClientRegistry>,
        config: &RelayConfig,
        metrics: Arc<RelayMetrics>,
    ) -> Self {
        Self {
            registry,
            history: Mutex::new(History::with_capacity(config.history_capacity)),
            stamp_messages: config.stamp_messages,
            metrics,
        }
    }

    /// Append a message and deliver it to every registered sink
    ///
    /// Empty text is dropped silently: no history entry, no broadcast, and
    /// `None` is returned.
    pub fn append(&self, text: impl Into<String>) -> Option<Arc<Message>> {
        self.append_with_report(text).map(|(message, _)| message)
    }

    /// Like [`append`](Self::append), also returning the fan-out outcome
    pub fn append_with_report(
        &self,
        text: impl Into<String>,
    ) -> Option<(Arc<Message>, DeliveryReport)> {
        let text = text.into();

        if text.is_empty() {
            self.metrics.record_dropped();
            tracing::debug!("Empty message dropped");
            return None;
        }

        let text = if self.stamp_messages {
            stamp_text(&text, Utc::now())
        } else {
            text
        };

        let mut history = self.history.lock();
        let message = history.push(text);
        self.metrics.record_accepted();

        let report = self.deliver(&message);
        drop(history);

        tracing::debug!(
            seq = message.seq,
            delivered = report.delivered,
            dropped = report.dropped,
            "Message broadcast"
        );

        Some((message, report))
    }

    /// Every retained message in arrival order
    pub fn history(&self) -> Vec<Arc<Message>> {
        self.history.lock().messages()
    }

    /// Retained message texts in arrival order
    pub fn history_texts(&self) -> Vec<String> {
        self.history.lock().texts()
    }

    /// Number of retained messages
    pub fn history_len(&self) -> usize {
        self.history.lock().len()
    }

    /// Sequence number of the latest accepted message, 0 if none yet
    pub fn last_seq(&self) -> u64 {
        self.history.lock().last_seq()
    }

    /// Get the registry this broadcaster delivers to
    pub fn registry(&self) -> &Arc<ClientRegistry> {
        &self.registry
    }

    /// Push one message to a snapshot of the registry
    ///
    /// A failed push unregisters that sink and moves on.
    fn deliver(&self, message: &Arc<Message>) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for (id, sink) in self.registry.snapshot() {
            match sink.push(Arc::clone(message)) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        sink_id = %id,
                        seq = message.seq,
                        error = %e,
                        "Delivery failed, dropping sink"
                    );
                    self.registry.unregister(&id);
                    report.dropped += 1;
                }
            }
        }

        self.metrics.record_fanout(report.delivered, report.dropped);
        report
    }
}

impl std::fmt::Debug for MessageBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageBroadcaster")
            .field("subscribers", &self.registry.len())
            .field("history_len", &self.history_len())
            .field("stamp_messages", &self.stamp_messages)
            .finish()
    }
}
