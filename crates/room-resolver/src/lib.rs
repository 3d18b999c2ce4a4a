//! # room-resolver
//!
//! Answers two questions against a room-booking schedule: which rooms are free
//! at a given date and time, and which events occupy a given room on a given
//! date.
//!
//! The schedule document (rooms → dates → events, plus the reverse index) is
//! loaded once into an immutable [`Schedule`]. Every user interaction then runs
//! the pure pipeline `Query → Resolution → display lines`.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use room_resolver::{resolve, Query, Resolution, Schedule};
//!
//! let json = r#"{
//!   "last_updated": "2024-02-28T18:00:00Z",
//!   "events_by_room": {
//!     "A101": {"01.03.2024": [{"start": "2024-03-01T09:00:00Z", "end": "2024-03-01T10:00:00Z",
//!                              "title": "Analysis", "course": "TINF23"}]},
//!     "B202": {}
//!   },
//!   "events_by_date": {}
//! }"#;
//! let schedule = Schedule::from_json(json).unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let query = Query::new(date, NaiveTime::from_hms_opt(8, 30, 0).unwrap(), "");
//! assert_eq!(
//!     resolve(Some(&schedule), &query),
//!     Resolution::FreeRooms(vec!["B202".to_string()])
//! );
//! ```
//!
//! ## Modules
//!
//! - [`schedule`] — dual-indexed, immutable event store
//! - [`document`] — defensive loading of the JSON schedule document
//! - [`datekey`] — `dd.mm.yyyy` join keys
//! - [`timestamp`] — wall-clock timestamp parsing
//! - [`query`] — query state, time defaulting and the selectable date range
//! - [`resolver`] — free-room and room-event resolution
//! - [`format`] — titles, event strings and result lines
//! - [`search`] — room-name autocomplete
//! - [`calendar`] — occupied-day markers for the date picker
//! - [`finder`] — façade bundling a schedule with display labels
//! - [`error`] — Error types

pub mod calendar;
pub mod datekey;
pub mod document;
pub mod error;
pub mod finder;
pub mod format;
pub mod query;
pub mod resolver;
pub mod schedule;
pub mod search;
pub mod timestamp;

pub use calendar::marked_dates;
pub use datekey::DateKey;
pub use error::RoomError;
pub use finder::RoomFinder;
pub use format::{format_event, format_last_updated, render, title, Labels};
pub use query::{Query, SelectableRange};
pub use resolver::{is_valid_room, resolve, Resolution, RoomEvents};
pub use schedule::{Event, Schedule};
pub use search::filtered_rooms;
pub use timestamp::Timestamp;
