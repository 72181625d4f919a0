// Error types for the departures data layer.
// Covers transit API failures, cache IO, and JSON handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeparturesError {
    #[error("HTTP {status} from {url}: {body}")]
    Http {
        status: u16,
        url: String,
        body: String,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache unavailable: {0}")]
    Cache(String),
}

pub type Result<T> = std::result::Result<T, DeparturesError>;
