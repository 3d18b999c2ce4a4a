//! Defensive loading of the JSON schedule document.
//!
//! Expected shape:
//!
//! ```json
//! {
//!   "last_updated": "2024-02-28T18:00:00Z",
//!   "events_by_room": { "A101": { "01.03.2024": [ { "start": "...", "end": "...",
//!                                                     "title": "...", "course": "..." } ] } },
//!   "events_by_date": { "01.03.2024": { "A101": [ ... ] } }
//! }
//! ```
//!
//! `events_by_room` is the canonical source. `events_by_date` only contributes
//! (date, room) lists that the by-room side lacks; both indexes are then
//! rebuilt from the merged booking list. Anything of the wrong shape is
//! skipped with a warning instead of failing the load.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::datekey::DateKey;
use crate::error::Result;
use crate::schedule::{Event, Schedule, ScheduleBuilder};
use crate::timestamp::Timestamp;

impl Schedule {
    /// Parse a schedule document. Fails only when `json` is not JSON at all.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Build a schedule from an already-parsed document.
    pub fn from_value(value: &Value) -> Self {
        let mut builder = Schedule::builder();
        let Some(root) = value.as_object() else {
            warn!("schedule document is not a JSON object; treating it as empty");
            return builder.build();
        };

        builder.last_updated(
            root.get("last_updated")
                .and_then(|v| Timestamp::from_value(v).at().ok()),
        );

        if let Some(rooms) = section(root, "events_by_room") {
            for (room, dates) in rooms {
                builder.room(room);
                let Some(dates) = dates.as_object() else {
                    warn!(room = %room, "room entry is not an object; skipped");
                    continue;
                };
                for (raw_date, events) in dates {
                    add_list(&mut builder, room, &DateKey::from_raw(raw_date), events);
                }
            }
        }

        let mut reconciled = 0usize;
        if let Some(days) = section(root, "events_by_date") {
            for (raw_date, rooms) in days {
                let Some(rooms) = rooms.as_object() else {
                    warn!(date = %raw_date, "day entry is not an object; skipped");
                    continue;
                };
                let date = DateKey::from_raw(raw_date);
                for (room, events) in rooms {
                    if builder.has_slot(room, &date) {
                        continue;
                    }
                    reconciled += 1;
                    add_list(&mut builder, room, &date, events);
                }
            }
        }
        if reconciled > 0 {
            warn!(
                reconciled,
                "events_by_date held entries missing from events_by_room; merged them"
            );
        }

        let schedule = builder.build();
        debug!(
            rooms = schedule.room_count(),
            bookings = schedule.bookings().len(),
            "schedule index built"
        );
        schedule
    }
}

fn section<'a>(root: &'a Map<String, Value>, name: &str) -> Option<&'a Map<String, Value>> {
    match root.get(name) {
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            warn!(section = name, "section is not an object; ignored");
            None
        }
        None => {
            debug!(section = name, "section missing");
            None
        }
    }
}

fn add_list(builder: &mut ScheduleBuilder, room: &str, date: &DateKey, events: &Value) {
    let Some(events) = events.as_array() else {
        warn!(room = %room, date = %date, "event list is not an array; skipped");
        return;
    };
    builder.slot(room, date);
    for raw in events {
        match parse_event(raw) {
            Some(event) => {
                builder.event(room, date, event);
            }
            None => warn!(room = %room, date = %date, "event is not an object; skipped"),
        }
    }
}

fn parse_event(raw: &Value) -> Option<Event> {
    let obj = raw.as_object()?;
    let stamp = |field: &str| match obj.get(field) {
        Some(v) => Timestamp::from_value(v),
        None => Timestamp::Invalid(format!("missing '{}'", field)),
    };
    let text = |field: &str| {
        obj.get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Some(Event {
        start: stamp("start"),
        end: stamp("end"),
        title: text("title"),
        course: text("course"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(raw: &str) -> DateKey {
        DateKey::parse(raw).unwrap()
    }

    #[test]
    fn non_object_document_is_empty() {
        let schedule = Schedule::from_value(&json!([1, 2, 3]));
        assert_eq!(schedule.room_count(), 0);
        assert!(schedule.last_updated().is_none());
    }

    #[test]
    fn invalid_json_text_is_an_error() {
        assert!(Schedule::from_json("{ not json").is_err());
    }

    #[test]
    fn by_date_only_entries_are_merged_into_both_indexes() {
        let doc = json!({
            "events_by_room": { "A101": {} },
            "events_by_date": {
                "01.03.2024": {
                    "B202": [{ "start": "2024-03-01T09:00:00Z", "end": "2024-03-01T10:00:00Z",
                               "title": "Physik", "course": "TINF22" }]
                }
            }
        });
        let schedule = Schedule::from_value(&doc);
        assert_eq!(schedule.rooms_known().collect::<Vec<_>>(), ["A101", "B202"]);
        assert_eq!(schedule.dates_for("B202"), vec![&key("01.03.2024")]);
        assert_eq!(
            schedule.events_for(&key("01.03.2024"), "B202").unwrap().len(),
            1
        );
    }

    #[test]
    fn by_room_wins_when_both_sides_have_the_pair() {
        let doc = json!({
            "events_by_room": { "A101": { "01.03.2024": [
                { "start": "2024-03-01T09:00:00Z", "end": "2024-03-01T10:00:00Z", "title": "X", "course": "C" }
            ] } },
            "events_by_date": { "01.03.2024": { "A101": [
                { "start": "2024-03-01T09:00:00Z", "end": "2024-03-01T10:00:00Z", "title": "X", "course": "C" }
            ] } }
        });
        let schedule = Schedule::from_value(&doc);
        assert_eq!(schedule.bookings().len(), 1);
    }

    #[test]
    fn wrong_shapes_are_skipped() {
        let doc = json!({
            "last_updated": "yesterday",
            "events_by_room": {
                "A101": "oops",
                "B202": { "01.03.2024": "oops", "02.03.2024": [42, { "title": "ok" }] }
            },
            "events_by_date": []
        });
        let schedule = Schedule::from_value(&doc);
        assert!(schedule.last_updated().is_none());
        assert_eq!(schedule.rooms_known().collect::<Vec<_>>(), ["A101", "B202"]);
        assert!(schedule.events_for(&key("01.03.2024"), "B202").is_none());

        let events = schedule.events_for(&key("02.03.2024"), "B202").unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "ok");
        assert_eq!(events[0].course, "");
        assert!(events[0].start.at().is_err());
    }

    #[test]
    fn unpadded_date_keys_are_normalised() {
        let doc = json!({ "events_by_room": { "A101": { "1.3.2024": [] } } });
        let schedule = Schedule::from_value(&doc);
        assert_eq!(schedule.dates_for("A101"), vec![&key("01.03.2024")]);
    }
}
