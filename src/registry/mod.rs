//! Client registry for pub/sub fan-out
//!
//! The registry tracks which subscribers are currently connected. Each
//! subscriber is a [`SinkHandle`], the sending half of a bounded queue whose
//! receiving half is owned by the connection.
//!
//! # Architecture
//!
//! ```text
//!                          Arc<ClientRegistry>
//!                     ┌─────────────────────────┐
//!                     │ sinks: HashMap<SinkId,  │
//!                     │   SinkHandle { tx }     │
//!                     │ >                       │
//!                     └───────────┬─────────────┘
//!                                 │ snapshot()
//!         ┌───────────────────────┼───────────────────────┐
//!         │                       │                       │
//!         ▼                       ▼                       ▼
//!   [Broadcaster]           [Subscription]          [Subscription]
//!   sink.push(message)      rx.recv()               rx.recv()
//!         │                       │                       │
//!         └──► try_send() ──► bounded queue ──► SSE event
//! ```
//!
//! # Lifetime
//!
//! The registry never decides when a sink dies. A sink leaves the map when
//! its connection drops (the subscription guard unregisters it), when a push
//! to it fails, or on shutdown.

pub mod entry;
pub mod error;
pub mod id;
pub mod store;

pub use entry::{SinkHandle, SinkState};
pub use error::{RegistryError, SinkDeliveryError};
pub use id::SinkId;
pub use store::ClientRegistry;
