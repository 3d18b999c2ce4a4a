//! WASM bindings for room-resolver.
//!
//! Exposes the resolver to the browser front end via `wasm-bindgen`. The front
//! end fetches `rooms.json`, hands the text to [`RoomFinderHandle::load`] once,
//! then calls the query methods on every input change. Complex values cross the
//! boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p room-resolver-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/pkg/ \
//!   target/wasm32-unknown-unknown/release/room_resolver_wasm.wasm
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use room_resolver::{DateKey, Labels, Query, Resolution, RoomFinder, Schedule, SelectableRange};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Query as sent by the front end.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct QueryDto {
    /// `dd.mm.yyyy` or `yyyy-mm-dd`
    date: String,
    /// `HH:MM`
    time: String,
    #[serde(default)]
    room: String,
    #[serde(default)]
    manual_time: bool,
}

impl QueryDto {
    fn into_query(self) -> Result<Query, String> {
        Ok(Query {
            date: parse_date(&self.date)?,
            time: parse_time(&self.time)?,
            room: self.room,
            manual_time: self.manual_time,
        })
    }
}

impl From<&Query> for QueryDto {
    fn from(q: &Query) -> Self {
        Self {
            date: q.date_key().to_string(),
            time: q.time.format("%H:%M").to_string(),
            room: q.room.clone(),
            manual_time: q.manual_time,
        }
    }
}

#[derive(Serialize)]
struct ResultDto {
    title: String,
    resolution: Resolution,
    lines: Vec<String>,
}

#[derive(Serialize)]
struct RangeDto {
    min: String,
    max: String,
}

// ---------------------------------------------------------------------------
// Helpers: parse front-end date/time strings
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    DateKey::parse(s)
        .ok()
        .and_then(|key| key.to_date())
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .ok_or_else(|| format!("Invalid date '{}'", s))
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("Invalid time '{}': {}", s, e))
}

fn parse_now(s: &str) -> Result<NaiveDateTime, String> {
    room_resolver::timestamp::parse_datetime(s).map_err(|e| e.to_string())
}

fn parse_query(json: &str) -> Result<Query, String> {
    serde_json::from_str::<QueryDto>(json)
        .map_err(|e| format!("Invalid query JSON: {}", e))?
        .into_query()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// JSON-in / JSON-out logic, independent of wasm-bindgen
// ---------------------------------------------------------------------------

fn resolve_json(finder: &RoomFinder, query_json: &str) -> Result<String, String> {
    let query = parse_query(query_json)?;
    to_json(&ResultDto {
        title: finder.title(&query),
        resolution: finder.resolve(&query),
        lines: finder.lines(&query),
    })
}

fn marked_dates_json(finder: &RoomFinder, room: &str) -> Result<String, String> {
    let dates: Vec<String> = finder
        .marked_dates(room)
        .iter()
        .map(NaiveDate::to_string)
        .collect();
    to_json(&dates)
}

fn change_date_json(query_json: &str, date: &str, now: &str) -> Result<String, String> {
    let query = parse_query(query_json)?.with_date(parse_date(date)?, parse_now(now)?);
    to_json(&QueryDto::from(&query))
}

fn selectable_range_json(today: &str) -> Result<String, String> {
    let range = SelectableRange::from_today(parse_date(today)?);
    to_json(&RangeDto {
        min: range.min.to_string(),
        max: range.max.to_string(),
    })
}

fn labels_for(lang: &str) -> Result<Labels, String> {
    Labels::for_language(lang).ok_or_else(|| format!("Unknown language '{}'", lang))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Resolver state held by the front end for the lifetime of the page.
#[wasm_bindgen]
pub struct RoomFinderHandle {
    inner: RoomFinder,
}

#[wasm_bindgen]
impl RoomFinderHandle {
    /// A finder with no schedule yet; every query resolves to "no data".
    ///
    /// `lang` selects the wording (`"en"` or `"de"`).
    #[wasm_bindgen(constructor)]
    pub fn new(lang: &str) -> Result<RoomFinderHandle, JsValue> {
        Ok(Self {
            inner: RoomFinder::new(labels_for(lang).map_err(js_err)?),
        })
    }

    /// Install the fetched `rooms.json` text.
    pub fn load(&mut self, json: &str) -> Result<(), JsValue> {
        let schedule = Schedule::from_json(json).map_err(|e| js_err(e.to_string()))?;
        self.inner.set_schedule(schedule);
        Ok(())
    }

    /// `{title, resolution, lines}` for a query `{date, time, room, manualTime}`.
    pub fn resolve(&self, query_json: &str) -> Result<String, JsValue> {
        resolve_json(&self.inner, query_json).map_err(js_err)
    }

    pub fn title(&self, query_json: &str) -> Result<String, JsValue> {
        let query = parse_query(query_json).map_err(js_err)?;
        Ok(self.inner.title(&query))
    }

    #[wasm_bindgen(js_name = "isValidRoom")]
    pub fn is_valid_room(&self, room: &str) -> bool {
        self.inner.is_valid_room(room)
    }

    /// JSON array of room names for the autocomplete field.
    #[wasm_bindgen(js_name = "filteredRooms")]
    pub fn filtered_rooms(&self, partial: &str) -> Result<String, JsValue> {
        to_json(&self.inner.filtered_rooms(partial)).map_err(js_err)
    }

    /// JSON array of `yyyy-mm-dd` dates to highlight in the date picker.
    #[wasm_bindgen(js_name = "markedDates")]
    pub fn marked_dates(&self, room: &str) -> Result<String, JsValue> {
        marked_dates_json(&self.inner, room).map_err(js_err)
    }

    /// `dd.mm.yyyy, HH:MM`, or `undefined` before a schedule is loaded.
    #[wasm_bindgen(js_name = "lastUpdated")]
    pub fn last_updated(&self) -> Option<String> {
        self.inner.last_updated()
    }
}

/// Apply the time defaulting policy for a date change and return the new query.
///
/// `now` is the browser's local wall-clock time as `yyyy-mm-ddTHH:MM:SS`.
#[wasm_bindgen(js_name = "changeDate")]
pub fn change_date(query_json: &str, date: &str, now: &str) -> Result<String, JsValue> {
    change_date_json(query_json, date, now).map_err(js_err)
}

/// `{min, max}` bounds for the date picker given today's date.
#[wasm_bindgen(js_name = "selectableRange")]
pub fn selectable_range(today: &str) -> Result<String, JsValue> {
    selectable_range_json(today).map_err(js_err)
}
