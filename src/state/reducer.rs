// Pure reducers over the state tree.
// Each takes the previous tree plus an action and returns a new tree.

use std::collections::HashMap;
use std::sync::Arc;

use crate::api::Stop;

use super::actions::{Action, AppError};
use super::tree::{AppState, StopTimeCacheEntry, StopsState};

/// Apply an action to the tree, producing the next tree.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    AppState {
        error: reduce_error(action),
        stops: reduce_stops(&state.stops, action),
    }
}

/// App-level error slot: set by error actions, cleared by everything else
/// (including an explicit dismiss).
fn reduce_error(action: &Action) -> Option<AppError> {
    action.error().cloned()
}

fn reduce_stops(stops: &StopsState, action: &Action) -> StopsState {
    match action {
        Action::StopsRequested => StopsState {
            is_fetching: true,
            ..stops.clone()
        },
        Action::StopsReceived(list) => {
            // Turn the stop array into an id -> Stop map, replacing the
            // directory wholesale
            let directory: HashMap<String, Stop> = list
                .iter()
                .map(|stop| (stop.id.clone(), stop.clone()))
                .collect();

            StopsState {
                is_fetching: false,
                directory: Some(Arc::new(directory)),
                ..stops.clone()
            }
        }
        Action::StopsFailed(_) => StopsState {
            is_fetching: false,
            ..stops.clone()
        },
        Action::StopSelected(selection) => StopsState {
            selected: selection.clone(),
            ..stops.clone()
        },
        Action::StopTimesRequested { stop_id } => {
            let mut stop_times = stops.stop_times.clone();
            stop_times.entry(stop_id.clone()).or_default().is_fetching = true;

            StopsState {
                stop_times,
                ..stops.clone()
            }
        }
        Action::StopTimesReceived {
            stop_id,
            patterns,
            timestamp,
        } => {
            let mut stop_times = stops.stop_times.clone();
            stop_times.insert(
                stop_id.clone(),
                StopTimeCacheEntry {
                    is_fetching: false,
                    timestamp: Some(*timestamp),
                    patterns: Arc::new(patterns.clone()),
                },
            );

            StopsState {
                stop_times,
                ..stops.clone()
            }
        }
        Action::StopTimesFailed { stop_id, .. } => {
            // Keep whatever stale data the entry holds; only the in-flight
            // flag must not stay set
            let mut stop_times = stops.stop_times.clone();
            if let Some(entry) = stop_times.get_mut(stop_id) {
                entry.is_fetching = false;
            }

            StopsState {
                stop_times,
                ..stops.clone()
            }
        }
        Action::AddFavorite(stop_id) => {
            let mut favorites = stops.favorites.clone();
            favorites.insert(stop_id.clone());

            StopsState {
                favorites,
                ..stops.clone()
            }
        }
        Action::RemoveFavorite(stop_id) => {
            let mut favorites = stops.favorites.clone();
            favorites.remove(stop_id);

            StopsState {
                favorites,
                ..stops.clone()
            }
        }
        Action::DismissError => stops.clone(),
    }
}
