//! Crate-wide error type

use crate::registry::RegistryError;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the relay
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Send payload was not a well-formed JSON string
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// Duplicate sink id on register
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Subscribe request did not accept `text/event-stream`
    #[error("request does not accept an event stream")]
    NotEventStream,

    /// Concurrent subscriber limit reached
    #[error("subscriber limit reached")]
    SubscriberLimit,

    /// The relay has been shut down and accepts no new subscribers
    #[error("relay is shutting down")]
    ShuttingDown,

    /// Listener I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
