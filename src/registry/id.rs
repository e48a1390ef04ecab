//! Sink identifiers
//!
//! Every subscriber gets a fresh random token when it connects. The token is
//! the only key the registry knows it by.

use uuid::Uuid;

/// Opaque unique identifier for a registered sink
///
/// Backed by a random v4 UUID, so ids are unguessable and collisions are
/// effectively impossible for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(Uuid);

impl SinkId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SinkId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
