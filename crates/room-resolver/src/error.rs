//! Error types for room-resolver operations.

use thiserror::Error;

/// Errors that can occur while loading a schedule or formatting its events.
///
/// Structural problems inside a syntactically valid document are not errors:
/// the loader skips them and the affected lookups come back empty.
#[derive(Error, Debug)]
pub enum RoomError {
    /// The document text was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// An event timestamp could not be interpreted as a date and time.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A date key was not of the form `dd.mm.yyyy`.
    #[error("Invalid date key: {0}")]
    InvalidDateKey(String),
}

/// Convenience alias used throughout room-resolver.
pub type Result<T> = std::result::Result<T, RoomError>;
