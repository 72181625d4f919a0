// The immutable application state tree.
// Reducers replace the tree wholesale; shared slices sit behind Arc so
// clones are structural, never deep.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::api::{PatternStopTimes, Selection, Stop};

use super::actions::AppError;

/// Root of the state tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// App-level error slot shown to the user, cleared by the next action.
    pub error: Option<AppError>,
    /// Stop directory, stoptimes, selection, and favorites.
    pub stops: StopsState,
}

/// State for the stop listing and its derived data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopsState {
    /// Whether a stop-list fetch is in flight.
    pub is_fetching: bool,
    /// Stop id -> stop, replaced wholesale on every successful list fetch.
    pub directory: Option<Arc<HashMap<String, Stop>>>,
    /// Per-stop stoptime cache, keyed by stop id. Entries live for the
    /// session; there is no eviction.
    pub stop_times: HashMap<String, StopTimeCacheEntry>,
    /// Currently chosen stop, if any.
    pub selected: Option<Selection>,
    /// User-curated favorite stop ids.
    pub favorites: BTreeSet<String>,
}

impl StopsState {
    /// Look up a stop in the directory.
    pub fn stop(&self, stop_id: &str) -> Option<&Stop> {
        self.directory.as_ref()?.get(stop_id)
    }
}

/// Cached stoptimes for one stop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopTimeCacheEntry {
    /// Whether a stoptime fetch for this stop is in flight.
    pub is_fetching: bool,
    /// When `patterns` was last refreshed, milliseconds since the epoch.
    /// Absent until the first fetch completes.
    pub timestamp: Option<i64>,
    /// Patterns and their upcoming departures.
    pub patterns: Arc<Vec<PatternStopTimes>>,
}
