//! Event construction
//!
//! Every stream opens with an `id: 0` event, then carries one `message` event
//! per chat message with the text JSON-encoded as a string:
//!
//! ```text
//! id: 0
//!
//! event: message
//! data: "hello"
//!
//! ```

use axum::response::sse::Event;

use crate::broadcast::Message;

/// Event name used for chat messages
pub const MESSAGE_EVENT: &str = "message";

/// Event sent first on every new stream
pub fn open_event() -> Event {
    Event::default().id("0")
}

/// Event carrying one chat message
pub fn message_event(message: &Message) -> Result<Event, axum::Error> {
    Event::default().event(MESSAGE_EVENT).json_data(&message.text)
}
