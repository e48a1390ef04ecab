//! In-memory chat relay with server-sent-events fan-out
//!
//! Messages are appended to an in-process history and pushed to every
//! connected subscriber as a server-sent event. Nothing is persisted: history
//! and subscriptions live for the lifetime of the process.
//!
//! # Example
//!
//! ```no_run
//! use chat_relay::{ChatServer, RelayConfig, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> chat_relay::Result<()> {
//!     let server = ChatServer::with_relay_config(
//!         ServerConfig::default(),
//!         RelayConfig::default().history_capacity(1000),
//!     );
//!     server
//!         .run_until(async {
//!             let _ = tokio::signal::ctrl_c().await;
//!         })
//!         .await
//! }
//! ```
//!
//! The relay can also be driven in-process:
//!
//! ```
//! use chat_relay::ChatRelay;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let relay = ChatRelay::new();
//! let mut subscription = relay.subscribe().unwrap();
//!
//! relay.send("hello");
//!
//! let message = subscription.recv().await.unwrap();
//! assert_eq!(message.text, "hello");
//! assert_eq!(relay.history_texts(), vec!["hello"]);
//! # }
//! ```

pub mod broadcast;
pub mod error;
pub mod registry;
pub mod relay;
pub mod server;
pub mod sse;
pub mod stats;

pub use broadcast::{DeliveryReport, Message, MessageBroadcaster};
pub use error::{Error, Result};
pub use registry::{ClientRegistry, RegistryError, SinkHandle, SinkId, SinkState};
pub use relay::{ChatRelay, RelayConfig, Subscription};
pub use server::{ChatServer, ServerConfig};
pub use stats::RelayStats;
