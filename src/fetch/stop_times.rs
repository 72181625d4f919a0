// Per-stop stoptime fetch.
// Short-TTL refresh keyed by stop id; stale data always goes to the network.

use chrono::Utc;
use tracing::debug;

use crate::api::TransitClient;
use crate::state::{Action, AppError, AppState, Store};

use super::FetchOutcome;

/// Stoptime staleness threshold: 30 seconds.
pub const STOP_TIMES_TTL_MS: i64 = 30 * 1000;

/// Whether stoptimes for `stop_id` should be fetched as of `now_ms`.
///
/// Fetch when the entry is absent or has never completed; skip while a
/// fetch is in flight; otherwise refetch only once the entry is strictly
/// older than the TTL (an entry exactly at the boundary is still fresh).
pub fn should_fetch_stop_times(state: &AppState, stop_id: &str, now_ms: i64) -> bool {
    let Some(entry) = state.stops.stop_times.get(stop_id) else {
        return true;
    };

    if entry.is_fetching {
        return false;
    }

    match entry.timestamp {
        Some(timestamp) => now_ms - timestamp > STOP_TIMES_TTL_MS,
        None => true,
    }
}

/// Retrieve stoptimes for a stop if needed.
///
/// A no-op while the entry is fresh or a fetch for this stop is in flight;
/// concurrent triggers for the same stop collapse into one request. There
/// is no local-cache fallback — stale stoptimes always go to the network.
/// Failures keep whatever stale patterns the entry holds, clear the
/// in-flight flag, and land in the app-level error slot.
pub async fn fetch_stop_times_if_needed(
    store: &Store,
    client: &TransitClient,
    stop_id: &str,
) -> FetchOutcome {
    let now_ms = Utc::now().timestamp_millis();
    let requested = store.dispatch_if(
        |state| should_fetch_stop_times(state, stop_id, now_ms),
        Action::StopTimesRequested {
            stop_id: stop_id.to_string(),
        },
    );
    if !requested {
        debug!(stop_id, "stoptimes fresh or fetch in flight, skipping");
        return FetchOutcome::Skipped;
    }

    match client.stop_times(stop_id).await {
        Ok(patterns) => {
            debug!(stop_id, patterns = patterns.len(), "stoptimes fetched");
            store.dispatch(Action::StopTimesReceived {
                stop_id: stop_id.to_string(),
                patterns,
                timestamp: Utc::now().timestamp_millis(),
            });
            FetchOutcome::Fetched
        }
        Err(err) => {
            store.dispatch(Action::StopTimesFailed {
                stop_id: stop_id.to_string(),
                error: AppError::with_cause(
                    format!("Failed to fetch stoptimes for stop {}", stop_id),
                    &err,
                ),
            });
            FetchOutcome::Failed
        }
    }
}
