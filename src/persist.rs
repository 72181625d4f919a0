// Favorites persistence.
// Restores the favorites set at startup and writes it back to the cache
// store after every state update.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::warn;

use crate::cache::KeyValue;
use crate::state::{AppState, Store};

/// Persisted-cache key for the favorites set.
pub const FAVORITES_KEY: &str = "stops--favorites";

/// Retrieve the favorite stop ids from the cache store.
///
/// Missing or unparsable data reads as an empty set.
pub fn load_favorites(cache: &dyn KeyValue) -> BTreeSet<String> {
    let Some(text) = cache.get(FAVORITES_KEY) else {
        return BTreeSet::new();
    };

    match serde_json::from_str(&text) {
        Ok(favorites) => favorites,
        Err(err) => {
            warn!(error = %err, "discarding unparsable favorites entry");
            BTreeSet::new()
        }
    }
}

/// Flush the favorites set to the cache store after every state update.
///
/// Writes are best-effort: storage failures are logged and swallowed so the
/// dispatch path never breaks over a full or unavailable store.
pub fn persist_favorites_on_change(store: &Store, cache: Arc<dyn KeyValue>) {
    store.subscribe(move |state: &AppState| {
        store_favorites(cache.as_ref(), &state.stops.favorites);
    });
}

fn store_favorites(cache: &dyn KeyValue, favorites: &BTreeSet<String>) {
    let json = match serde_json::to_string(favorites) {
        Ok(json) => json,
        Err(err) => {
            warn!(error = %err, "failed to serialize favorites");
            return;
        }
    };

    if let Err(err) = cache.put(FAVORITES_KEY, &json) {
        warn!(error = %err, "failed to persist favorites");
    }
}
