//! Free-room and room-event resolution.
//!
//! A room is **busy** at the queried instant when it has an entry for the day
//! and every event in that entry ends strictly after the instant. Whether an
//! event has already started is not considered, so a room whose only booking
//! is later in the day counts as busy all morning.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::format::format_event;
use crate::query::Query;
use crate::schedule::Schedule;

/// Outcome of resolving one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    /// The schedule has not been loaded yet.
    NoData,
    /// No valid room selected: every known room that is not busy, in
    /// enumeration order.
    FreeRooms(Vec<String>),
    /// A valid room is selected.
    RoomEvents(RoomEvents),
}

/// Events of the selected room on the selected day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum RoomEvents {
    /// Formatted event lines, in stored order.
    Listed(Vec<String>),
    /// The room has no entry for the day.
    NoEvents,
    /// An entry exists but could not be formatted.
    Failed(String),
}

/// True iff `room` is non-empty and a known room name (exact match).
pub fn is_valid_room(schedule: &Schedule, room: &str) -> bool {
    !room.is_empty() && schedule.contains_room(room)
}

/// Resolve `query` against the schedule, or [`Resolution::NoData`] when there
/// is none yet.
pub fn resolve(schedule: Option<&Schedule>, query: &Query) -> Resolution {
    let Some(schedule) = schedule else {
        return Resolution::NoData;
    };
    if is_valid_room(schedule, &query.room) {
        Resolution::RoomEvents(room_events(schedule, query))
    } else {
        Resolution::FreeRooms(free_rooms(schedule, query))
    }
}

/// Known rooms that are not busy at the query's date and time.
pub fn free_rooms(schedule: &Schedule, query: &Query) -> Vec<String> {
    let instant = query.instant();
    let busy: HashSet<&str> = schedule
        .day_entries(&query.date_key())
        .into_iter()
        .filter(|(_, events)| events.iter().all(|event| event.ends_after(instant)))
        .map(|(room, _)| room)
        .collect();

    schedule
        .rooms_known()
        .filter(|room| !busy.contains(room))
        .map(str::to_string)
        .collect()
}

/// Formatted events of the query's room on the query's date.
pub fn room_events(schedule: &Schedule, query: &Query) -> RoomEvents {
    let date = query.date_key();
    let Some(events) = schedule.events_for(&date, &query.room) else {
        return RoomEvents::NoEvents;
    };
    match events
        .into_iter()
        .map(format_event)
        .collect::<crate::error::Result<Vec<_>>>()
    {
        Ok(lines) => RoomEvents::Listed(lines),
        Err(err) => {
            warn!(room = %query.room, date = %date, error = %err, "room events could not be formatted");
            RoomEvents::Failed(err.to_string())
        }
    }
}
