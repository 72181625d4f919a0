// Transit API endpoint functions.
// Provides typed methods for fetching data from the stop-index API.

use crate::error::Result;

use super::client::TransitClient;
use super::types::{PatternStopTimes, Stop};

impl TransitClient {
    /// Get the full stop list.
    pub async fn stops(&self) -> Result<Vec<Stop>> {
        let response = self.get("/stops").await?;
        let stops: Vec<Stop> = response.json().await?;
        Ok(stops)
    }

    /// Get upcoming stoptimes for a stop, grouped by service pattern.
    pub async fn stop_times(&self, stop_id: &str) -> Result<Vec<PatternStopTimes>> {
        let response = self.get(&format!("/stops/{}/stoptimes", stop_id)).await?;
        let patterns: Vec<PatternStopTimes> = response.json().await?;
        Ok(patterns)
    }
}
