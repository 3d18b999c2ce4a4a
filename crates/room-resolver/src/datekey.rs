//! `dd.mm.yyyy` date keys joining the by-room and by-date indexes.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RoomError};

const DATE_KEY_FORMAT: &str = "%d.%m.%Y";

/// A calendar date rendered as `dd.mm.yyyy`.
///
/// Keys built from a [`NaiveDate`] are always zero-padded, so one calendar day
/// maps to exactly one key. Keys read from a document that do not parse as a
/// date are kept verbatim; they never match a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    /// Normalise a raw document key. `1.3.2024` and `01.03.2024` yield the same key.
    pub fn from_raw(raw: &str) -> Self {
        match Self::parse(raw) {
            Ok(key) => key,
            Err(_) => Self(raw.to_string()),
        }
    }

    /// Parse a `d.m.yyyy` string into a normalised key.
    pub fn parse(raw: &str) -> Result<Self> {
        NaiveDate::parse_from_str(raw.trim(), DATE_KEY_FORMAT)
            .map(Self::from)
            .map_err(|_| RoomError::InvalidDateKey(raw.to_string()))
    }

    /// The calendar date this key names, if it names one.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, DATE_KEY_FORMAT).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date.format(DATE_KEY_FORMAT).to_string())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
