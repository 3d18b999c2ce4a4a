//! Display formatting: event lines, result titles and the result box.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::Query;
use crate::resolver::{Resolution, RoomEvents};
use crate::schedule::Event;

const TIME_FORMAT: &str = "%H:%M";

/// User-facing wording. The shape of each message is fixed; only the words vary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    /// `"{room_schedule} {date}"`
    pub room_schedule: String,
    /// `"{free_rooms} {date}"`
    pub free_rooms: String,
    /// `"{free_rooms} {date} {from} {time}"`
    pub from: String,
    pub no_events: String,
    pub not_loaded: String,
    pub error: String,
}

impl Labels {
    pub fn english() -> Self {
        Self {
            room_schedule: "Room schedule for".into(),
            free_rooms: "Free rooms on".into(),
            from: "from".into(),
            no_events: "No events recorded".into(),
            not_loaded: "Data not yet available".into(),
            error: "Error:".into(),
        }
    }

    pub fn german() -> Self {
        Self {
            room_schedule: "Raumtermine für den".into(),
            free_rooms: "Freie Räume am".into(),
            from: "ab".into(),
            no_events: "Keine Termine eingetragen".into(),
            not_loaded: "Daten werden geladen...".into(),
            error: "Fehler:".into(),
        }
    }

    /// Look up a preset by language code (`en`, `de`).
    pub fn for_language(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Self::english()),
            "de" | "german" | "deutsch" => Some(Self::german()),
            _ => None,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::english()
    }
}

/// `"HH:MM-HH:MM title (course)"`.
pub fn format_event(event: &Event) -> Result<String> {
    let start = event.start.at()?;
    let end = event.end.at()?;
    Ok(format!(
        "{}-{} {} ({})",
        start.format(TIME_FORMAT),
        end.format(TIME_FORMAT),
        event.title,
        event.course
    ))
}

/// Title of the result box.
///
/// Room mode names the date; free-room mode adds the time unless it is `00:00`.
pub fn title(query: &Query, is_valid_room: bool, labels: &Labels) -> String {
    let date = query.date_key();
    if is_valid_room {
        return format!("{} {}", labels.room_schedule, date);
    }
    let time = query.time.format(TIME_FORMAT).to_string();
    if time != "00:00" {
        format!("{} {} {} {}", labels.free_rooms, date, labels.from, time)
    } else {
        format!("{} {}", labels.free_rooms, date)
    }
}

/// Lines shown in the result box for a resolution.
pub fn render(resolution: &Resolution, labels: &Labels) -> Vec<String> {
    match resolution {
        Resolution::NoData => vec![labels.not_loaded.clone()],
        Resolution::FreeRooms(rooms) => rooms.clone(),
        Resolution::RoomEvents(RoomEvents::Listed(lines)) if !lines.is_empty() => lines.clone(),
        Resolution::RoomEvents(RoomEvents::Listed(_) | RoomEvents::NoEvents) => {
            vec![labels.no_events.clone()]
        }
        Resolution::RoomEvents(RoomEvents::Failed(reason)) => {
            vec![format!("{} {}", labels.error, reason)]
        }
    }
}

/// `dd.mm.yyyy, HH:MM`, as shown next to "last updated".
pub fn format_last_updated(at: NaiveDateTime) -> String {
    at.format("%d.%m.%Y, %H:%M").to_string()
}
