//! Façade for front ends: one optional schedule plus display labels.
//!
//! The host creates a [`RoomFinder`] before the document fetch completes and
//! hands the schedule over with [`RoomFinder::set_schedule`]. Until then every
//! resolution is [`Resolution::NoData`].

use chrono::NaiveDate;

use crate::calendar;
use crate::format::{self, Labels};
use crate::query::Query;
use crate::resolver::{self, Resolution};
use crate::schedule::Schedule;
use crate::search;

#[derive(Debug, Clone, Default)]
pub struct RoomFinder {
    schedule: Option<Schedule>,
    labels: Labels,
}

impl RoomFinder {
    pub fn new(labels: Labels) -> Self {
        Self {
            schedule: None,
            labels,
        }
    }

    pub fn with_schedule(schedule: Schedule, labels: Labels) -> Self {
        Self {
            schedule: Some(schedule),
            labels,
        }
    }

    pub fn set_schedule(&mut self, schedule: Schedule) {
        self.schedule = Some(schedule);
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn is_valid_room(&self, room: &str) -> bool {
        self.schedule
            .as_ref()
            .is_some_and(|s| resolver::is_valid_room(s, room))
    }

    pub fn resolve(&self, query: &Query) -> Resolution {
        resolver::resolve(self.schedule.as_ref(), query)
    }

    pub fn title(&self, query: &Query) -> String {
        format::title(query, self.is_valid_room(&query.room), &self.labels)
    }

    /// Result-box lines for `query`.
    pub fn lines(&self, query: &Query) -> Vec<String> {
        format::render(&self.resolve(query), &self.labels)
    }

    /// Autocomplete candidates; empty while nothing is loaded.
    pub fn filtered_rooms(&self, partial: &str) -> Vec<String> {
        self.schedule
            .as_ref()
            .map(|s| search::filtered_rooms(s, partial))
            .unwrap_or_default()
    }

    pub fn marked_dates(&self, room: &str) -> Vec<NaiveDate> {
        calendar::marked_dates(self.schedule.as_ref(), room)
    }

    /// `dd.mm.yyyy, HH:MM` of the document's generation time, if known.
    pub fn last_updated(&self) -> Option<String> {
        self.schedule
            .as_ref()
            .and_then(Schedule::last_updated)
            .map(format::format_last_updated)
    }
}
