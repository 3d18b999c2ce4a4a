//! Occupied-day markers for the date picker.

use chrono::NaiveDate;
use tracing::debug;

use crate::schedule::Schedule;

/// Calendar dates on which `room` has an entry, in stored order.
///
/// Empty when no schedule is loaded or the room is empty or unknown. Keys that
/// do not name a real date are skipped.
pub fn marked_dates(schedule: Option<&Schedule>, room: &str) -> Vec<NaiveDate> {
    let Some(schedule) = schedule else {
        return Vec::new();
    };
    if room.is_empty() {
        return Vec::new();
    }
    schedule
        .dates_for(room)
        .into_iter()
        .filter_map(|key| {
            let date = key.to_date();
            if date.is_none() {
                debug!(room = %room, key = %key, "date key is not a calendar date; not marked");
            }
            date
        })
        .collect()
}
