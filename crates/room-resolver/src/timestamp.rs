//! Wall-clock timestamp parsing.
//!
//! No time-zone conversion is performed: an RFC 3339 offset (including `Z`) is
//! dropped and the local date/time fields are used as written. Epoch
//! milliseconds are read as UTC wall-clock time.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::{Result, RoomError};

/// An event boundary as read from the document.
///
/// Unparsable values are kept rather than rejected so the failure surfaces
/// when the event is actually looked up, not when the document is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    At(NaiveDateTime),
    Invalid(String),
}

impl Timestamp {
    /// Interpret a JSON value (string or integer epoch milliseconds).
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::from_text(s),
            Value::Number(n) => match n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis) {
                Some(dt) => Self::At(dt.naive_utc()),
                None => Self::Invalid(n.to_string()),
            },
            other => Self::Invalid(other.to_string()),
        }
    }

    pub fn from_text(text: &str) -> Self {
        match parse_datetime(text) {
            Ok(dt) => Self::At(dt),
            Err(_) => Self::Invalid(text.to_string()),
        }
    }

    /// The parsed date and time, or [`RoomError::InvalidTimestamp`].
    pub fn at(&self) -> Result<NaiveDateTime> {
        match self {
            Self::At(dt) => Ok(*dt),
            Self::Invalid(raw) => Err(RoomError::InvalidTimestamp(raw.clone())),
        }
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self::At(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            Self::Invalid(raw) => f.write_str(raw),
        }
    }
}

/// Parse an ISO 8601 datetime string into a wall-clock `NaiveDateTime`.
///
/// Accepts RFC 3339 (offset discarded), `2024-03-01T09:00:00[.fff]` and
/// `2024-03-01 09:00:00`.
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    // Try RFC 3339 first (has timezone info).
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }
    Err(RoomError::InvalidTimestamp(text.to_string()))
}
