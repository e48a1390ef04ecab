//! Relay service
//!
//! [`ChatRelay`] ties one [`ClientRegistry`](crate::registry::ClientRegistry)
//! to one [`MessageBroadcaster`](crate::broadcast::MessageBroadcaster) and
//! exposes the operations a web layer needs:
//!
//! - `history_texts()` for initial page state and history fetches
//! - `send_json()` for the send endpoint
//! - `subscribe()` for the events endpoint

pub mod config;
pub mod service;
pub mod subscription;

pub use config::RelayConfig;
pub use service::ChatRelay;
pub use subscription::Subscription;
