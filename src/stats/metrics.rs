//! Statistics and metrics for the relay

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Live counters updated by the broadcaster and subscriptions
///
/// All counters are monotonically increasing and updated with relaxed
/// atomics; read them through [`RelayMetrics::snapshot`].
#[derive(Debug)]
pub struct RelayMetrics {
    started_at: Instant,
    messages_accepted: AtomicU64,
    messages_dropped: AtomicU64,
    deliveries: AtomicU64,
    delivery_failures: AtomicU64,
    subscriptions_total: AtomicU64,
}

impl RelayMetrics {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            messages_accepted: AtomicU64::new(0),
            messages_dropped: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            delivery_failures: AtomicU64::new(0),
            subscriptions_total: AtomicU64::new(0),
        }
    }

    /// Record a message added to history
    pub fn record_accepted(&self) {
        self.messages_accepted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an empty message that was discarded
    pub fn record_dropped(&self) {
        self.messages_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of one fan-out
    pub fn record_fanout(&self, delivered: usize, failed: usize) {
        self.deliveries.fetch_add(delivered as u64, Ordering::Relaxed);
        self.delivery_failures
            .fetch_add(failed as u64, Ordering::Relaxed);
    }

    /// Record a new subscriber
    pub fn record_subscribed(&self) {
        self.subscriptions_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Time since the counters were created
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Copy the counters into a plain struct
    pub fn snapshot(
        &self,
        active_subscribers: usize,
        history_len: usize,
        last_seq: u64,
    ) -> RelayStats {
        RelayStats {
            messages_accepted: self.messages_accepted.load(Ordering::Relaxed),
            messages_dropped: self.messages_dropped.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
            subscriptions_total: self.subscriptions_total.load(Ordering::Relaxed),
            active_subscribers: active_subscribers as u64,
            history_len: history_len as u64,
            last_seq,
            uptime_secs: self.uptime().as_secs(),
        }
    }
}

impl Default for RelayMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time relay statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelayStats {
    /// Messages added to history
    pub messages_accepted: u64,
    /// Empty messages discarded
    pub messages_dropped: u64,
    /// Successful pushes into sinks
    pub deliveries: u64,
    /// Pushes that failed and disconnected their sink
    pub delivery_failures: u64,
    /// Subscribers ever registered
    pub subscriptions_total: u64,
    /// Subscribers currently registered
    pub active_subscribers: u64,
    /// Messages currently held in history
    pub history_len: u64,
    /// Sequence number of the latest accepted message, 0 if none yet
    pub last_seq: u64,
    /// Seconds since the relay started
    pub uptime_secs: u64,
}
