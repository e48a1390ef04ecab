//! Server-sent events
//!
//! Event construction and content negotiation for the events endpoint. The
//! wire encoding and keep-alive comments come from `axum::response::sse`.

pub mod event;

pub use event::{message_event, open_event, MESSAGE_EVENT};

/// Content type of an event stream
pub const EVENT_STREAM: &str = "text/event-stream";

/// Check whether an `Accept` header value asks for an event stream
///
/// Only an explicit `text/event-stream` media range counts. Wildcards such as
/// `*/*` do not, so ordinary page loads are not turned into streams.
pub fn accepts_event_stream(accept: Option<&str>) -> bool {
    let Some(accept) = accept else {
        return false;
    };

    accept.split(',').any(|range| {
        let media_type = range.split(';').next().unwrap_or_default().trim();
        media_type.eq_ignore_ascii_case(EVENT_STREAM)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_exact() {
        assert!(accepts_event_stream(Some("text/event-stream")));
    }

    #[test]
    fn test_accepts_in_list_with_params() {
        assert!(accepts_event_stream(Some(
            "application/json, Text/Event-Stream; q=0.9"
        )));
    }

    #[test]
    fn test_rejects_other_types() {
        assert!(!accepts_event_stream(None));
        assert!(!accepts_event_stream(Some("")));
        assert!(!accepts_event_stream(Some("text/html,*/*")));
        assert!(!accepts_event_stream(Some("text/event-streams")));
    }
}
