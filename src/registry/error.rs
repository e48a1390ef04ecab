//! Registry error types
//!
//! Error types for sink registration and delivery.

use super::id::SinkId;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A sink with this id is already registered
    #[error("Sink already registered: {0}")]
    DuplicateId(SinkId),
}

/// Failure to push a message into a single sink
///
/// Local to fan-out: the broadcaster recovers by unregistering the sink and
/// never hands this to the caller of `append`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SinkDeliveryError {
    /// The receiving side has been dropped
    #[error("sink closed")]
    Closed,
    /// The sink's queue is full (subscriber is not keeping up)
    #[error("sink queue overflow")]
    Overflow,
}
