//! Chat message type

use chrono::{DateTime, Local, Utc};

/// An accepted chat message
///
/// Immutable once appended. `seq` is the arrival position: it starts at 1 and
/// strictly increases, even when old messages are evicted from history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Arrival order position
    pub seq: u64,
    /// Message text as stored and broadcast
    pub text: String,
}

impl Message {
    /// Create a message
    pub fn new(seq: u64, text: String) -> Self {
        Self { seq, text }
    }
}

/// Prefix `text` with the local wall-clock time, e.g. `"3:04:05 pm hello"`
pub fn stamp_text(text: &str, at: DateTime<Utc>) -> String {
    stamp_text_in(text, &at.with_timezone(&Local))
}

fn stamp_text_in<Tz: chrono::TimeZone>(text: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{} {}", at.format("%-I:%M:%S %P"), text)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_stamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 15, 4, 5).unwrap();

        assert_eq!(stamp_text_in("hello", &at), "3:04:05 pm hello");
    }

    #[test]
    fn test_stamp_morning() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 0, 30, 0).unwrap();

        assert_eq!(stamp_text_in("early", &at), "12:30:00 am early");
    }

    #[test]
    fn test_stamp_local_keeps_text() {
        let stamped = stamp_text("hi", Utc::now());

        assert!(stamped.ends_with(" hi"));
        assert!(stamped.contains("am") || stamped.contains("pm"));
    }
}
