// State management module.
// The immutable application tree, its actions and reducers, and the store.

pub mod actions;
pub mod reducer;
pub mod selectors;
pub mod store;
pub mod tree;

pub use actions::{Action, AppError};
pub use reducer::reduce;
pub use selectors::{favorite_selections, matches_filter, stop_options, stop_selection};
pub use store::Store;
pub use tree::{AppState, StopTimeCacheEntry, StopsState};
