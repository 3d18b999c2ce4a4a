//! Query state supplied by the front end, plus the time defaulting policy and
//! the selectable date range.

use chrono::{Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::datekey::DateKey;

/// The user's current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Selected room; empty or unknown means "show free rooms".
    #[serde(default)]
    pub room: String,
    /// When set, date changes leave `time` alone.
    #[serde(default)]
    pub manual_time: bool,
}

impl Query {
    pub fn new(date: NaiveDate, time: NaiveTime, room: impl Into<String>) -> Self {
        Self {
            date,
            time,
            room: room.into(),
            manual_time: false,
        }
    }

    /// The initial selection: today, the current minute, no room.
    pub fn now(now: NaiveDateTime) -> Self {
        Self::new(now.date(), truncate_to_minute(now.time()), "")
    }

    /// Move to `date`, applying the time defaulting policy.
    ///
    /// Without manual time, today gets the current minute and any other day
    /// gets `00:00`.
    pub fn with_date(mut self, date: NaiveDate, now: NaiveDateTime) -> Self {
        self.date = date;
        if !self.manual_time {
            self.time = if date == now.date() {
                truncate_to_minute(now.time())
            } else {
                NaiveTime::MIN
            };
        }
        self
    }

    /// Pin the time; later date changes no longer reset it.
    pub fn with_manual_time(mut self, time: NaiveTime) -> Self {
        self.time = time;
        self.manual_time = true;
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    pub fn date_key(&self) -> DateKey {
        DateKey::from(self.date)
    }

    /// The selected date and time as one instant.
    pub fn instant(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// Dates the picker offers: yesterday through three calendar months later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectableRange {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl SelectableRange {
    pub fn from_today(today: NaiveDate) -> Self {
        let min = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        let max = min.checked_add_months(Months::new(3)).unwrap_or(NaiveDate::MAX);
        Self { min, max }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn now() -> NaiveDateTime {
        day(2024, 3, 1).and_hms_milli_opt(14, 37, 52, 250).unwrap()
    }

    #[test]
    fn initial_query_zeroes_seconds() {
        let q = Query::now(now());
        assert_eq!(q.date, day(2024, 3, 1));
        assert_eq!(q.time, hm(14, 37));
        assert!(q.room.is_empty());
        assert!(!q.manual_time);
    }

    #[test]
    fn other_day_resets_to_midnight_and_today_restores_clock() {
        let q = Query::now(now()).with_date(day(2024, 3, 4), now());
        assert_eq!(q.time, NaiveTime::MIN);
        let q = q.with_date(day(2024, 3, 1), now());
        assert_eq!(q.time, hm(14, 37));
    }

    #[test]
    fn manual_time_survives_date_changes() {
        let q = Query::now(now())
            .with_manual_time(hm(10, 15))
            .with_date(day(2024, 3, 4), now())
            .with_date(day(2024, 3, 1), now());
        assert_eq!(q.time, hm(10, 15));
    }

    #[test]
    fn range_uses_calendar_months() {
        let range = SelectableRange::from_today(day(2024, 12, 1));
        assert_eq!(range.min, day(2024, 11, 30));
        // Feb has no 30th; month arithmetic clamps to the last day.
        assert_eq!(range.max, day(2025, 2, 28));
        assert!(range.contains(day(2024, 12, 24)));
        assert!(!range.contains(day(2025, 3, 1)));
    }
}
