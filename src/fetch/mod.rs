// Conditional fetch orchestration.
// Decides cache vs network per resource and keeps fetches single-flight.

pub mod stop_times;
pub mod stops;

pub use stop_times::{STOP_TIMES_TTL_MS, fetch_stop_times_if_needed, should_fetch_stop_times};
pub use stops::{STOP_LIST_KEY, STOP_LIST_TTL_MS, fetch_stops_if_needed, should_fetch_stops};

/// How a fetch trigger resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The guard declined: data present, fresh, or already in flight.
    Skipped,
    /// Served from the local cache store without a network request.
    Cached,
    /// Fetched over the network.
    Fetched,
    /// The network fetch failed; the app-level error slot has the details.
    Failed,
}
