// Transit data API module.
// Provides the HTTP client and wire types for the stop-index endpoints.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{DEFAULT_BASE_URL, TransitClient};
pub use types::*;
