//! Relay configuration

use std::time::Duration;

/// Default per-subscriber queue length, in messages
pub const DEFAULT_SINK_CAPACITY: usize = 64;

/// Default interval between keep-alive comments on idle streams
pub const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(15);

/// Relay configuration options
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Frames a subscriber may have queued before it is disconnected
    pub sink_capacity: usize,

    /// Maximum messages kept in history (None = unbounded)
    pub history_capacity: Option<usize>,

    /// Prefix each message with its local arrival time
    pub stamp_messages: bool,

    /// Interval between keep-alive comments on event streams
    pub keep_alive_interval: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            sink_capacity: DEFAULT_SINK_CAPACITY,
            history_capacity: None,
            stamp_messages: false,
            keep_alive_interval: DEFAULT_KEEP_ALIVE,
        }
    }
}

impl RelayConfig {
    /// Set the per-subscriber queue length (minimum 1)
    pub fn sink_capacity(mut self, capacity: usize) -> Self {
        self.sink_capacity = capacity.max(1);
        self
    }

    /// Bound the history to `capacity` messages
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity.max(1));
        self
    }

    /// Enable or disable arrival-time prefixes
    pub fn stamp_messages(mut self, enabled: bool) -> Self {
        self.stamp_messages = enabled;
        self
    }

    /// Set the keep-alive interval
    pub fn keep_alive(mut self, interval: Duration) -> Self {
        self.keep_alive_interval = interval;
        self
    }
}
