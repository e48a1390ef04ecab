//! Message history and fan-out
//!
//! [`MessageBroadcaster`] is the write path of the relay: it validates,
//! records, and delivers each message.
//!
//! # Zero-Copy Design
//!
//! Each accepted message is allocated once as an `Arc<Message>`. History and
//! every sink queue hold clones of that `Arc`, so pushing it into N sinks only
//! bumps a reference count.

pub mod broadcaster;
pub mod history;
pub mod message;

pub use broadcaster::{DeliveryReport, MessageBroadcaster};
pub use history::History;
pub use message::Message;
