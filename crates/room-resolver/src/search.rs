//! Room-name autocomplete.

use crate::schedule::Schedule;

/// Known rooms whose name contains `partial`, ignoring case, in enumeration
/// order. An empty `partial` matches every room.
pub fn filtered_rooms(schedule: &Schedule, partial: &str) -> Vec<String> {
    let needle = partial.to_lowercase();
    schedule
        .rooms_known()
        .filter(|room| room.to_lowercase().contains(&needle))
        .map(str::to_string)
        .collect()
}
