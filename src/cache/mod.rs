// Cache module for persisted client data.
// Stores the stop list and favorites as JSON for reuse across sessions.

pub mod paths;
pub mod store;

pub use store::{
    DiskStore, Envelope, KeyValue, MemoryStore, now_ms, read_envelope, read_if_fresh,
    write_envelope,
};
