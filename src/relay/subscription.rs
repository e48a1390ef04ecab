//! Subscriber handle
//!
//! A [`Subscription`] is the long-lived half of a subscribe request. It owns
//! the receiving end of the sink's queue and a guard that unregisters the sink
//! when the subscription is dropped, which is how transport cancellation
//! (client disconnect) reaches the registry.

use std::future;
use std::sync::Arc;

use axum::response::sse::Event;
use futures_util::{stream, Stream, StreamExt};
use tokio::sync::{mpsc, OwnedSemaphorePermit};

use crate::broadcast::Message;
use crate::registry::{ClientRegistry, SinkId, SinkState};
use crate::sse;

/// Unregisters a sink when dropped
struct SinkGuard {
    id: SinkId,
    registry: Arc<ClientRegistry>,
}

impl Drop for SinkGuard {
    fn drop(&mut self) {
        if self.registry.unregister(&self.id) {
            tracing::debug!(sink_id = %self.id, "Subscriber disconnected");
        }
    }
}

/// A live subscriber
///
/// Yields one message per broadcast until the sink is closed by the
/// broadcaster (failed push), by shutdown, or by dropping this value.
pub struct Subscription {
    rx: mpsc::Receiver<Arc<Message>>,
    guard: SinkGuard,
    _permit: Option<OwnedSemaphorePermit>,
}

impl Subscription {
    pub(crate) fn new(
        id: SinkId,
        rx: mpsc::Receiver<Arc<Message>>,
        registry: Arc<ClientRegistry>,
    ) -> Self {
        Self {
            rx,
            guard: SinkGuard { id, registry },
            _permit: None,
        }
    }

    /// Hold a connection-limit permit for as long as the subscription lives
    pub fn hold_permit(mut self, permit: OwnedSemaphorePermit) -> Self {
        self._permit = Some(permit);
        self
    }

    /// The sink id this subscription is registered under
    pub fn id(&self) -> SinkId {
        self.guard.id
    }

    /// Whether the registry still delivers to this subscription
    pub fn state(&self) -> SinkState {
        if self.guard.registry.contains(&self.guard.id) {
            SinkState::Registered
        } else {
            SinkState::Unregistered
        }
    }

    /// Wait for the next message
    ///
    /// Returns `None` once the sink has been closed and its queue drained.
    /// Cancel safe.
    pub async fn recv(&mut self) -> Option<Arc<Message>> {
        self.rx.recv().await
    }

    /// Convert into an SSE event stream
    ///
    /// The stream starts with the `id: 0` opening event, then carries one
    /// `message` event per broadcast. Dropping the stream unregisters the
    /// sink.
    pub fn into_events(
        self,
    ) -> impl Stream<Item = Result<Event, axum::Error>> + Send + 'static {
        let opening = stream::once(future::ready(Ok::<_, axum::Error>(sse::open_event())));

        let messages = stream::unfold(self, |mut sub| async move {
            let message = sub.recv().await?;
            Some((sse::message_event(&message), sub))
        });

        opening.chain(messages)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.guard.id)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::response::sse::{KeepAlive, Sse};
    use axum::response::IntoResponse;
    use tokio::sync::Semaphore;

    use super::*;
    use crate::registry::SinkHandle;

    fn subscribe(registry: &Arc<ClientRegistry>) -> (SinkHandle, Subscription) {
        let id = SinkId::new();
        let (sink, rx) = SinkHandle::channel(8);
        registry.register(id, sink.clone()).unwrap();
        (sink, Subscription::new(id, rx, Arc::clone(registry)))
    }

    fn message(seq: u64, text: &str) -> Arc<Message> {
        Arc::new(Message::new(seq, text.to_string()))
    }

    #[tokio::test]
    async fn test_recv_in_push_order() {
        let registry = Arc::new(ClientRegistry::new());
        let (sink, mut sub) = subscribe(&registry);

        sink.push(message(1, "hi")).unwrap();
        sink.push(message(2, "there")).unwrap();

        assert_eq!(sub.recv().await.unwrap().text, "hi");
        assert_eq!(sub.recv().await.unwrap().text, "there");
    }

    #[test]
    fn test_drop_unregisters() {
        let registry = Arc::new(ClientRegistry::new());
        let (_sink, sub) = subscribe(&registry);
        let id = sub.id();

        assert_eq!(sub.state(), SinkState::Registered);
        drop(sub);

        assert!(!registry.contains(&id));
    }

    #[test]
    fn test_drop_after_unregister_is_noop() {
        let registry = Arc::new(ClientRegistry::new());
        let (_sink, sub) = subscribe(&registry);
        let (_other_sink, other) = subscribe(&registry);

        registry.unregister(&sub.id());
        assert_eq!(sub.state(), SinkState::Unregistered);
        drop(sub);

        assert!(registry.contains(&other.id()));
    }

    #[tokio::test]
    async fn test_recv_ends_when_sink_closed() {
        let registry = Arc::new(ClientRegistry::new());
        let (sink, mut sub) = subscribe(&registry);

        sink.push(message(1, "last")).unwrap();
        registry.clear();
        drop(sink);

        assert_eq!(sub.recv().await.unwrap().text, "last");
        assert!(sub.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_events_open_then_messages() {
        let registry = Arc::new(ClientRegistry::new());
        let (sink, sub) = subscribe(&registry);

        sink.push(message(1, "hi")).unwrap();
        registry.clear();
        drop(sink);

        let body = Sse::new(sub.into_events()).into_response().into_body();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

        assert_eq!(&bytes[..], b"id: 0\n\nevent: message\ndata: \"hi\"\n\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_keep_alive() {
        let registry = Arc::new(ClientRegistry::new());
        let (_sink, sub) = subscribe(&registry);

        let sse = Sse::new(sub.into_events())
            .keep_alive(KeepAlive::new().interval(Duration::from_secs(15)));
        let mut body = sse.into_response().into_body().into_data_stream();

        assert_eq!(&body.next().await.unwrap().unwrap()[..], b"id: 0\n\n");
        // Time is paused, so the runtime auto-advances to the keep-alive tick
        assert_eq!(&body.next().await.unwrap().unwrap()[..], b":\n\n");
    }

    #[tokio::test]
    async fn test_events_drop_unregisters() {
        let registry = Arc::new(ClientRegistry::new());
        let (_sink, sub) = subscribe(&registry);
        let id = sub.id();
        let mut events = Box::pin(sub.into_events());

        assert!(events.next().await.unwrap().is_ok());
        assert!(registry.contains(&id));
        drop(events);

        assert!(!registry.contains(&id));
    }

    #[test]
    fn test_permit_released_on_drop() {
        let registry = Arc::new(ClientRegistry::new());
        let slots = Arc::new(Semaphore::new(1));
        let permit = Arc::clone(&slots).try_acquire_owned().unwrap();
        let (_sink, sub) = subscribe(&registry);
        let sub = sub.hold_permit(permit);

        assert_eq!(slots.available_permits(), 0);
        drop(sub);
        assert_eq!(slots.available_permits(), 1);
    }
}
