//! Dual-indexed, immutable schedule.
//!
//! Every booking lives once in a canonical list. The by-room and by-date
//! indexes hold positions into that list and are only ever extended together
//! through [`ScheduleBuilder`], so for every room R and date D
//! `by_room[R][D]` and `by_date[D][R]` name the same bookings.

use chrono::NaiveDateTime;
use indexmap::IndexMap;

use crate::datekey::DateKey;
use crate::timestamp::Timestamp;

/// A single booked event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub start: Timestamp,
    pub end: Timestamp,
    pub title: String,
    pub course: String,
}

impl Event {
    pub fn new(
        start: impl Into<Timestamp>,
        end: impl Into<Timestamp>,
        title: impl Into<String>,
        course: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            title: title.into(),
            course: course.into(),
        }
    }

    /// True when the event ends strictly after `instant`.
    ///
    /// An unparsable end never counts as ending after anything.
    pub fn ends_after(&self, instant: NaiveDateTime) -> bool {
        matches!(self.end, Timestamp::At(end) if end > instant)
    }
}

/// An event together with the room and day it is filed under.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub room: String,
    pub date: DateKey,
    pub event: Event,
}

type Slots = Vec<usize>;

/// The loaded schedule. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    last_updated: Option<NaiveDateTime>,
    bookings: Vec<Booking>,
    by_room: IndexMap<String, IndexMap<DateKey, Slots>>,
    by_date: IndexMap<DateKey, IndexMap<String, Slots>>,
}

impl Schedule {
    pub fn builder() -> ScheduleBuilder {
        ScheduleBuilder::default()
    }

    /// When the document was generated, if it said so.
    pub fn last_updated(&self) -> Option<NaiveDateTime> {
        self.last_updated
    }

    /// All known room names in enumeration order.
    pub fn rooms_known(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_room.keys().map(String::as_str)
    }

    pub fn room_count(&self) -> usize {
        self.by_room.len()
    }

    pub fn contains_room(&self, room: &str) -> bool {
        self.by_room.contains_key(room)
    }

    /// Events filed for `room` on `date`, in stored order.
    ///
    /// `None` when the date or the room has no entry at all. An entry with an
    /// empty list yields `Some(vec![])`.
    pub fn events_for(&self, date: &DateKey, room: &str) -> Option<Vec<&Event>> {
        let slots = self.by_date.get(date)?.get(room)?;
        Some(self.collect(slots))
    }

    /// Per-room event lists for one day, in the order rooms were first seen
    /// on that day. Empty when nobody booked the day.
    pub fn day_entries(&self, date: &DateKey) -> Vec<(&str, Vec<&Event>)> {
        match self.by_date.get(date) {
            Some(rooms) => rooms
                .iter()
                .map(|(room, slots)| (room.as_str(), self.collect(slots)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Day keys that have an entry for `room`, in stored order.
    pub fn dates_for(&self, room: &str) -> Vec<&DateKey> {
        self.by_room
            .get(room)
            .map(|dates| dates.keys().collect())
            .unwrap_or_default()
    }

    /// The canonical booking list both indexes are built from.
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    fn collect(&self, slots: &[usize]) -> Vec<&Event> {
        slots.iter().map(|&i| &self.bookings[i].event).collect()
    }
}

/// Builds a [`Schedule`], keeping both indexes in step.
#[derive(Debug, Default)]
pub struct ScheduleBuilder {
    schedule: Schedule,
}

impl ScheduleBuilder {
    pub fn last_updated(&mut self, at: Option<NaiveDateTime>) -> &mut Self {
        self.schedule.last_updated = at;
        self
    }

    /// Register a room even if it has no bookings.
    pub fn room(&mut self, room: &str) -> &mut Self {
        if !self.schedule.by_room.contains_key(room) {
            self.schedule.by_room.insert(room.to_string(), IndexMap::new());
        }
        self
    }

    /// Open the (room, date) entry in both indexes without adding an event.
    pub fn slot(&mut self, room: &str, date: &DateKey) -> &mut Self {
        self.room(room);
        let s = &mut self.schedule;
        if let Some(dates) = s.by_room.get_mut(room) {
            dates.entry(date.clone()).or_default();
        }
        s.by_date
            .entry(date.clone())
            .or_default()
            .entry(room.to_string())
            .or_default();
        self
    }

    /// File `event` under `room` on `date`.
    pub fn event(&mut self, room: &str, date: &DateKey, event: Event) -> &mut Self {
        self.slot(room, date);
        let s = &mut self.schedule;
        let index = s.bookings.len();
        s.bookings.push(Booking {
            room: room.to_string(),
            date: date.clone(),
            event,
        });
        if let Some(slots) = s.by_room.get_mut(room).and_then(|d| d.get_mut(date)) {
            slots.push(index);
        }
        if let Some(slots) = s.by_date.get_mut(date).and_then(|r| r.get_mut(room)) {
            slots.push(index);
        }
        self
    }

    /// True when `room` already has an entry for `date`.
    pub fn has_slot(&self, room: &str, date: &DateKey) -> bool {
        self.schedule
            .by_room
            .get(room)
            .is_some_and(|dates| dates.contains_key(date))
    }

    pub fn build(self) -> Schedule {
        self.schedule
    }
}
