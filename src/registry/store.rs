//! Client registry implementation
//!
//! The authoritative set of sinks that should receive the next broadcast.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::entry::SinkHandle;
use super::error::RegistryError;
use super::id::SinkId;

/// Registry of currently connected sinks
///
/// Thread-safe via `RwLock`. The lock is never held across I/O: the
/// broadcaster takes a [`snapshot`](Self::snapshot) and pushes after the lock
/// is released.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    /// Map of sink id to sink handle
    sinks: RwLock<HashMap<SinkId, SinkHandle>>,
}

impl ClientRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink
    ///
    /// Returns an error if the id is already present; the existing
    /// registration is left untouched.
    pub fn register(&self, id: SinkId, sink: SinkHandle) -> Result<(), RegistryError> {
        let mut sinks = self.sinks.write();

        if sinks.contains_key(&id) {
            tracing::warn!(sink_id = %id, "Duplicate sink registration rejected");
            return Err(RegistryError::DuplicateId(id));
        }

        sinks.insert(id, sink);

        tracing::info!(
            sink_id = %id,
            subscribers = sinks.len(),
            "Sink registered"
        );

        Ok(())
    }

    /// Unregister a sink
    ///
    /// Idempotent: removing an absent id is a no-op. Returns whether an entry
    /// was removed.
    pub fn unregister(&self, id: &SinkId) -> bool {
        let mut sinks = self.sinks.write();
        let removed = sinks.remove(id).is_some();

        if removed {
            tracing::info!(
                sink_id = %id,
                subscribers = sinks.len(),
                "Sink unregistered"
            );
        }

        removed
    }

    /// Point-in-time copy of every registered sink
    pub fn snapshot(&self) -> Vec<(SinkId, SinkHandle)> {
        self.sinks
            .read()
            .iter()
            .map(|(id, sink)| (*id, sink.clone()))
            .collect()
    }

    /// Check if an id is registered
    pub fn contains(&self, id: &SinkId) -> bool {
        self.sinks.read().contains_key(id)
    }

    /// Number of registered sinks
    pub fn len(&self) -> usize {
        self.sinks.read().len()
    }

    /// Check if no sinks are registered
    pub fn is_empty(&self) -> bool {
        self.sinks.read().is_empty()
    }

    /// Remove every sink
    ///
    /// Dropping the handles closes each sink, which ends every subscriber
    /// stream once its queue drains. Returns the number of sinks removed.
    pub fn clear(&self) -> usize {
        let removed = {
            let mut sinks = self.sinks.write();
            let count = sinks.len();
            sinks.clear();
            count
        };

        if removed > 0 {
            tracing::info!(removed = removed, "All sinks unregistered");
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::broadcast::Message;

    #[test]
    fn test_register_unregister() {
        let registry = ClientRegistry::new();
        let id = SinkId::new();
        let (sink, _rx) = SinkHandle::channel(4);

        registry.register(id, sink).unwrap();
        assert!(registry.contains(&id));
        assert_eq!(registry.len(), 1);

        assert!(registry.unregister(&id));
        assert!(!registry.contains(&id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_register_keeps_original() {
        let registry = ClientRegistry::new();
        let id = SinkId::new();
        let (first, mut first_rx) = SinkHandle::channel(4);
        let (second, mut second_rx) = SinkHandle::channel(4);

        registry.register(id, first).unwrap();
        let result = registry.register(id, second);
        assert_eq!(result, Err(RegistryError::DuplicateId(id)));
        assert_eq!(registry.len(), 1);

        // The stored handle still feeds the first receiver
        let (_, stored) = registry.snapshot().pop().unwrap();
        stored.push(Arc::new(Message::new(1, "x".into()))).unwrap();
        assert!(first_rx.try_recv().is_ok());
        assert!(second_rx.try_recv().is_err());
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let registry = ClientRegistry::new();
        let keep = SinkId::new();
        let gone = SinkId::new();
        let (sink_a, _rx_a) = SinkHandle::channel(4);
        let (sink_b, _rx_b) = SinkHandle::channel(4);

        registry.register(keep, sink_a).unwrap();
        registry.register(gone, sink_b).unwrap();

        assert!(registry.unregister(&gone));
        assert!(!registry.unregister(&gone));
        assert!(!registry.unregister(&SinkId::new()));

        assert!(registry.contains(&keep));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_snapshot_is_point_in_time() {
        let registry = ClientRegistry::new();
        let a = SinkId::new();
        let (sink_a, _rx_a) = SinkHandle::channel(4);
        registry.register(a, sink_a).unwrap();

        let snapshot = registry.snapshot();

        let b = SinkId::new();
        let (sink_b, _rx_b) = SinkHandle::channel(4);
        registry.register(b, sink_b).unwrap();
        registry.unregister(&a);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].0, a);
        assert_eq!(registry.snapshot()[0].0, b);
    }

    #[tokio::test]
    async fn test_clear_closes_sinks() {
        let registry = ClientRegistry::new();
        let (sink, mut rx) = SinkHandle::channel(4);
        registry.register(SinkId::new(), sink).unwrap();

        assert_eq!(registry.clear(), 1);
        assert!(registry.is_empty());
        assert!(rx.recv().await.is_none());
    }
}
