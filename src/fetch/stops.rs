// Stop-list fetch.
// Serves a fresh local-cache envelope when possible and otherwise issues a
// single network fetch, guarded so concurrent triggers collapse into one.

use tracing::{debug, warn};

use crate::api::{Stop, TransitClient};
use crate::cache::{KeyValue, read_if_fresh, write_envelope};
use crate::state::{Action, AppError, AppState, Store};

use super::FetchOutcome;

/// Persisted-cache key for the stop list.
pub const STOP_LIST_KEY: &str = "STOP_LIST";

/// The stop list barely changes; reuse a persisted copy for a day.
pub const STOP_LIST_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Whether a stop-list fetch should start: no directory yet and no fetch
/// currently in flight.
pub fn should_fetch_stops(state: &AppState) -> bool {
    !state.stops.is_fetching && state.stops.directory.is_none()
}

/// Retrieve the stop list if needed.
///
/// A no-op while the directory is already loaded or a fetch is in flight.
/// A fresh cache envelope is used without touching the network; otherwise
/// the list is fetched once, cached, and merged into the tree. Failures
/// land in the app-level error slot and clear the in-flight flag. There is
/// no timeout: a request that never settles leaves the flag set.
pub async fn fetch_stops_if_needed(
    store: &Store,
    client: &TransitClient,
    cache: &dyn KeyValue,
) -> FetchOutcome {
    if !store.dispatch_if(should_fetch_stops, Action::StopsRequested) {
        debug!("stop list present or fetch in flight, skipping");
        return FetchOutcome::Skipped;
    }

    // Check if the data is already cached locally
    if let Some(stops) = read_if_fresh::<Vec<Stop>>(cache, STOP_LIST_KEY, STOP_LIST_TTL_MS) {
        debug!(count = stops.len(), "stop list served from local cache");
        store.dispatch(Action::StopsReceived(stops));
        return FetchOutcome::Cached;
    }

    match client.stops().await {
        Ok(stops) => {
            if let Err(err) = write_envelope(cache, STOP_LIST_KEY, &stops) {
                warn!(error = %err, "failed to cache stop list");
            }
            debug!(count = stops.len(), "stop list fetched");
            store.dispatch(Action::StopsReceived(stops));
            FetchOutcome::Fetched
        }
        Err(err) => {
            store.dispatch(Action::StopsFailed(AppError::with_cause(
                "Failed to fetch stop list",
                &err,
            )));
            FetchOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Envelope, MemoryStore, now_ms};
    use crate::state::AppState;
    use serde_json::Map;

    /// A client whose requests fail fast; reaching the network at all is
    /// the failure signal these tests look for.
    fn unreachable_client() -> TransitClient {
        TransitClient::new("http://127.0.0.1:1")
    }

    fn stop(id: &str) -> Stop {
        Stop {
            id: id.to_string(),
            name: "Main St".to_string(),
            code: "001".to_string(),
            extra: Map::new(),
        }
    }

    fn cache_with_envelope(age_ms: i64) -> MemoryStore {
        let cache = MemoryStore::new();
        let envelope = Envelope {
            timestamp: now_ms() - age_ms,
            data: vec![stop("S1")],
        };
        cache
            .put(STOP_LIST_KEY, &serde_json::to_string(&envelope).unwrap())
            .unwrap();
        cache
    }

    #[test]
    fn test_guard_requires_empty_idle_directory() {
        let state = AppState::default();
        assert!(should_fetch_stops(&state));

        let fetching = crate::state::reduce(&state, &Action::StopsRequested);
        assert!(!should_fetch_stops(&fetching));

        let loaded = crate::state::reduce(&state, &Action::StopsReceived(vec![stop("S1")]));
        assert!(!should_fetch_stops(&loaded));
    }

    #[tokio::test]
    async fn test_skip_while_fetch_in_flight() {
        let store = Store::default();
        store.dispatch(Action::StopsRequested);

        let outcome =
            fetch_stops_if_needed(&store, &unreachable_client(), &MemoryStore::new()).await;
        assert_eq!(outcome, FetchOutcome::Skipped);
        assert!(store.state().stops.is_fetching, "no completion dispatched");
    }

    #[tokio::test]
    async fn test_fresh_envelope_bypasses_network() {
        let store = Store::default();
        let cache = cache_with_envelope(23 * 60 * 60 * 1000);

        // The client is unreachable, so touching the network would fail
        let outcome = fetch_stops_if_needed(&store, &unreachable_client(), &cache).await;
        assert_eq!(outcome, FetchOutcome::Cached);

        let state = store.state();
        assert!(!state.stops.is_fetching);
        assert!(state.stops.directory.as_ref().unwrap().contains_key("S1"));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_stale_envelope_goes_to_network() {
        let store = Store::default();
        let cache = cache_with_envelope(25 * 60 * 60 * 1000);

        let outcome = fetch_stops_if_needed(&store, &unreachable_client(), &cache).await;
        assert_eq!(outcome, FetchOutcome::Failed, "stale cache must not be served");

        let state = store.state();
        assert!(!state.stops.is_fetching, "flag cleared on the failure path");
        assert!(state.stops.directory.is_none());
        let error = state.error.as_ref().unwrap();
        assert_eq!(error.message, "Failed to fetch stop list");
        assert!(error.cause.is_some());
    }

    #[tokio::test]
    async fn test_corrupt_envelope_treated_as_miss() {
        let store = Store::default();
        let cache = MemoryStore::new();
        cache.put(STOP_LIST_KEY, "{definitely not json").unwrap();

        let outcome = fetch_stops_if_needed(&store, &unreachable_client(), &cache).await;
        assert_eq!(outcome, FetchOutcome::Failed, "corrupt cache falls through to network");
    }

    #[tokio::test]
    async fn test_concurrent_triggers_collapse_to_one_load() {
        let store = Store::default();
        let cache = cache_with_envelope(0);
        let client = unreachable_client();

        let (a, b) = tokio::join!(
            fetch_stops_if_needed(&store, &client, &cache),
            fetch_stops_if_needed(&store, &client, &cache),
        );

        // Exactly one trigger performs the load; the other is a no-op,
        // whether it lost the guard race or saw the finished directory
        let outcomes = [a, b];
        assert_eq!(
            outcomes.iter().filter(|o| **o == FetchOutcome::Cached).count(),
            1
        );
        assert_eq!(
            outcomes.iter().filter(|o| **o == FetchOutcome::Skipped).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_second_trigger_after_load_is_noop() {
        let store = Store::default();
        let cache = cache_with_envelope(0);

        let first = fetch_stops_if_needed(&store, &unreachable_client(), &cache).await;
        assert_eq!(first, FetchOutcome::Cached);

        let second = fetch_stops_if_needed(&store, &unreachable_client(), &cache).await;
        assert_eq!(second, FetchOutcome::Skipped);
    }
}
