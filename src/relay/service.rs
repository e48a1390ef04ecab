//! Chat relay service
//!
//! The single explicitly constructed object request handlers talk to.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::broadcast::{Message, MessageBroadcaster};
use crate::error::{Error, Result};
use crate::registry::{ClientRegistry, SinkHandle, SinkId};
use crate::stats::{RelayMetrics, RelayStats};

use super::config::RelayConfig;
use super::subscription::Subscription;

/// Chat relay: message history plus live fan-out to subscribers
///
/// Construct one per process and share it as `Arc<ChatRelay>`. Call
/// [`shutdown`](Self::shutdown) before exiting to close every open stream.
#[derive(Debug)]
pub struct ChatRelay {
    config: RelayConfig,
    registry: Arc<ClientRegistry>,
    broadcaster: MessageBroadcaster,
    metrics: Arc<RelayMetrics>,
    closed: AtomicBool,
}

impl ChatRelay {
    /// Create a relay with default configuration
    pub fn new() -> Self {
        Self::with_config(RelayConfig::default())
    }

    /// Create a relay with custom configuration
    pub fn with_config(config: RelayConfig) -> Self {
        let registry = Arc::new(ClientRegistry::new());
        let metrics = Arc::new(RelayMetrics::new());
        let broadcaster =
            MessageBroadcaster::new(Arc::clone(&registry), &config, Arc::clone(&metrics));

        tracing::info!(
            sink_capacity = config.sink_capacity,
            history_capacity = ?config.history_capacity,
            "Chat relay started"
        );

        Self {
            config,
            registry,
            broadcaster,
            metrics,
            closed: AtomicBool::new(false),
        }
    }

    /// Get the relay configuration
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Get the client registry
    pub fn registry(&self) -> &Arc<ClientRegistry> {
        &self.registry
    }

    /// Get the broadcaster
    pub fn broadcaster(&self) -> &MessageBroadcaster {
        &self.broadcaster
    }

    /// Full history in arrival order
    pub fn history(&self) -> Vec<Arc<Message>> {
        self.broadcaster.history()
    }

    /// History texts in arrival order, as served to new viewers
    pub fn history_texts(&self) -> Vec<String> {
        self.broadcaster.history_texts()
    }

    /// Append a message and broadcast it
    ///
    /// Returns `None` when the text is empty and nothing was recorded.
    pub fn send(&self, text: impl Into<String>) -> Option<Arc<Message>> {
        self.broadcaster.append(text)
    }

    /// Append a message from a JSON request body
    ///
    /// The body must be a single JSON string; anything else is rejected with
    /// [`Error::InvalidMessage`] before history is touched.
    pub fn send_json(&self, body: &[u8]) -> Result<Option<Arc<Message>>> {
        let text: String = serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "Rejected send payload");
            Error::InvalidMessage(e.to_string())
        })?;

        Ok(self.send(text))
    }

    /// Register a new subscriber
    ///
    /// The returned [`Subscription`] receives every message appended after
    /// this call, and unregisters itself when dropped. Fails with
    /// [`Error::ShuttingDown`] once [`shutdown`](Self::shutdown) has run.
    pub fn subscribe(&self) -> Result<Subscription> {
        self.subscribe_as(SinkId::new())
    }

    /// Register a subscriber under a caller-chosen id
    pub fn subscribe_as(&self, id: SinkId) -> Result<Subscription> {
        if self.is_closed() {
            return Err(Error::ShuttingDown);
        }

        let (sink, rx) = SinkHandle::channel(self.config.sink_capacity);

        if let Err(e) = self.registry.register(id, sink) {
            tracing::error!(sink_id = %id, error = %e, "Subscribe aborted");
            return Err(e.into());
        }
        let subscription = Subscription::new(id, rx, Arc::clone(&self.registry));

        // A shutdown that cleared the registry before this registration
        // landed would never close it, so back out here instead
        if self.is_closed() {
            drop(subscription);
            tracing::debug!(sink_id = %id, "Subscribe raced shutdown");
            return Err(Error::ShuttingDown);
        }
        self.metrics.record_subscribed();

        Ok(subscription)
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }

    /// Current statistics
    pub fn stats(&self) -> RelayStats {
        self.metrics.snapshot(
            self.registry.len(),
            self.broadcaster.history_len(),
            self.broadcaster.last_seq(),
        )
    }

    /// Check if [`shutdown`](Self::shutdown) has run
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Close every open subscription and refuse new ones
    ///
    /// History is kept and sends are still accepted. Returns the number of
    /// subscriptions closed.
    pub fn shutdown(&self) -> usize {
        self.closed.store(true, Ordering::SeqCst);
        let closed = self.registry.clear();
        tracing::info!(closed = closed, "Chat relay shut down");
        closed
    }
}

impl Default for ChatRelay {
    fn default() -> Self {
        Self::new()
    }
}
