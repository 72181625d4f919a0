// Pure queries over the state tree for UI consumption.
// Option lists, favorite resolution, and the dropdown filter predicate.

use crate::api::Selection;

use super::tree::AppState;

/// The minimum length of the filter string before matching any options.
const FILTER_MIN_LENGTH: usize = 2;

/// Selection entry for a stop id, when the directory knows the stop.
pub fn stop_selection(state: &AppState, stop_id: &str) -> Option<Selection> {
    state.stops.stop(stop_id).map(|stop| stop.selection())
}

/// Option entries for every stop in the directory, sorted by label.
pub fn stop_options(state: &AppState) -> Vec<Selection> {
    let Some(directory) = state.stops.directory.as_ref() else {
        return Vec::new();
    };

    let mut options: Vec<Selection> = directory.values().map(|stop| stop.selection()).collect();
    options.sort_by(|a, b| a.label.cmp(&b.label));
    options
}

/// Favorite stops resolved against the directory; ids the directory does
/// not know are silently dropped.
pub fn favorite_selections(state: &AppState) -> Vec<Selection> {
    state
        .stops
        .favorites
        .iter()
        .filter_map(|stop_id| stop_selection(state, stop_id))
        .collect()
}

/// Whether an option label matches the typed filter.
///
/// Case-insensitive prefix match that only kicks in once the filter is
/// longer than `FILTER_MIN_LENGTH`.
pub fn matches_filter(label: &str, filter: &str) -> bool {
    let needle = filter.to_lowercase();
    let needle = needle.trim();
    filter.len() > FILTER_MIN_LENGTH && label.to_lowercase().starts_with(needle)
}
