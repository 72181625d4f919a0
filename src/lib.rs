//! Client-side data layer for transit departure boards.
//!
//! Provides a cached stop directory, per-stop live stoptimes with a short
//! staleness threshold, a favorites set persisted across sessions, and an
//! immutable state tree driven by pure reducers. Fetches are conditional and
//! single-flight: concurrent triggers for the same resource collapse into
//! one network request.

pub mod api;
pub mod cache;
pub mod error;
pub mod fetch;
pub mod persist;
pub mod state;

pub use api::TransitClient;
pub use error::{DeparturesError, Result};
pub use fetch::{FetchOutcome, fetch_stop_times_if_needed, fetch_stops_if_needed};
pub use persist::{load_favorites, persist_favorites_on_change};
pub use state::{Action, AppError, AppState, Store};
