// Actions applied to the state tree.
// Fetch lifecycle transitions, selection changes, and favorites edits.

use std::fmt;

use crate::api::{PatternStopTimes, Selection, Stop};

/// Everything the reducers know how to apply.
#[derive(Debug, Clone)]
pub enum Action {
    /// A stop-list fetch has started.
    StopsRequested,
    /// The stop list arrived (from network or local cache).
    StopsReceived(Vec<Stop>),
    /// The stop-list fetch failed.
    StopsFailed(AppError),
    /// The user chose a stop, or cleared the choice.
    StopSelected(Option<Selection>),
    /// A stoptime fetch has started for a stop.
    StopTimesRequested { stop_id: String },
    /// Stoptimes arrived for a stop. `timestamp` is the fetch completion
    /// time in epoch milliseconds, stamped by the fetch layer so the
    /// reducer stays clock-free.
    StopTimesReceived {
        stop_id: String,
        patterns: Vec<PatternStopTimes>,
        timestamp: i64,
    },
    /// The stoptime fetch for a stop failed.
    StopTimesFailed { stop_id: String, error: AppError },
    /// Add a stop to the favorites set.
    AddFavorite(String),
    /// Remove a stop from the favorites set.
    RemoveFavorite(String),
    /// Clear the app-level error slot.
    DismissError,
}

impl Action {
    /// The error carried by this action, if it is an error variant.
    pub fn error(&self) -> Option<&AppError> {
        match self {
            Action::StopsFailed(error) => Some(error),
            Action::StopTimesFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// A user-displayable error kept in the state tree.
///
/// Wraps a friendly message around the rendered lower-level failure so the
/// error banner can show both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    /// Human-readable message for the error banner.
    pub message: String,
    /// The underlying failure, rendered, when there is one.
    pub cause: Option<String>,
}

impl AppError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(message: impl Into<String>, cause: &dyn fmt::Display) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause.to_string()),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {}", self.message, cause),
            None => write!(f, "{}", self.message),
        }
    }
}
