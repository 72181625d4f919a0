// Transit API wire types.
// Defines structs for deserializing the stop-index JSON responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A physical transit stop.
///
/// Fields beyond id/name/code vary by router version and are carried along
/// opaquely so a cache round-trip loses nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Stop {
    /// Dropdown-style selection entry for this stop, labeled "Name (code)".
    pub fn selection(&self) -> Selection {
        Selection {
            value: self.id.clone(),
            label: format!("{} ({})", self.name, self.code),
        }
    }
}

/// The stop currently chosen in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub value: String,
    pub label: String,
}

/// A service pattern through a stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternInfo {
    pub id: String,
    #[serde(default)]
    pub desc: String,
}

/// A pattern and its upcoming departures from one stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternStopTimes {
    pub pattern: PatternInfo,
    #[serde(default)]
    pub times: Vec<StopTimeEntry>,
}

/// One scheduled (and possibly realtime-updated) departure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTimeEntry {
    /// Start of the service day, seconds since the epoch.
    pub service_day: i64,
    /// Scheduled departure, seconds after the service day start.
    pub scheduled_departure: i64,
    /// Realtime-estimated departure, seconds after the service day start.
    pub realtime_departure: i64,
    /// Difference between realtime and schedule, seconds.
    pub departure_delay: i64,
    /// Whether a realtime estimate is available.
    pub realtime: bool,
    /// Trip the departure belongs to.
    pub trip_id: String,
}

/// How a departure's realtime estimate relates to its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealtimeState {
    /// No realtime data for this trip.
    NotAvailable,
    /// Realtime estimate deviates from the schedule.
    Updated,
    /// Realtime estimate matches the schedule.
    OnTime,
}

impl StopTimeEntry {
    /// Realtime departure as absolute seconds since the epoch.
    pub fn departure_at(&self) -> i64 {
        self.service_day + self.realtime_departure
    }

    /// Scheduled departure as absolute seconds since the epoch.
    pub fn scheduled_at(&self) -> i64 {
        self.service_day + self.scheduled_departure
    }

    pub fn realtime_state(&self) -> RealtimeState {
        if !self.realtime {
            return RealtimeState::NotAvailable;
        }

        if self.departure_delay != 0 {
            return RealtimeState::Updated;
        }

        RealtimeState::OnTime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_preserves_unknown_fields() {
        let json = r#"{
            "id": "HSL:1040129",
            "name": "Kamppi",
            "code": "0013",
            "lat": 60.168992,
            "lon": 24.932366,
            "zoneId": "A"
        }"#;

        let stop: Stop = serde_json::from_str(json).unwrap();
        assert_eq!(stop.id, "HSL:1040129");
        assert_eq!(stop.name, "Kamppi");
        assert_eq!(stop.code, "0013");
        assert_eq!(stop.extra.get("zoneId"), Some(&Value::from("A")));

        // The opaque fields survive a serialize round-trip
        let text = serde_json::to_string(&stop).unwrap();
        let back: Stop = serde_json::from_str(&text).unwrap();
        assert_eq!(back, stop);
    }

    #[test]
    fn test_selection_label_format() {
        let stop = Stop {
            id: "S1".to_string(),
            name: "Main St".to_string(),
            code: "001".to_string(),
            extra: Map::new(),
        };

        let selection = stop.selection();
        assert_eq!(selection.value, "S1");
        assert_eq!(selection.label, "Main St (001)");
    }

    #[test]
    fn test_stoptime_wire_format_is_camel_case() {
        let json = r#"{
            "pattern": {"id": "HSL:1055:0:01", "desc": "55 to Koskela"},
            "times": [{
                "serviceDay": 1470171600,
                "scheduledDeparture": 61920,
                "realtimeDeparture": 61980,
                "departureDelay": 60,
                "realtime": true,
                "tripId": "HSL:1055_20160801_Ma_1_1706"
            }]
        }"#;

        let pattern: PatternStopTimes = serde_json::from_str(json).unwrap();
        assert_eq!(pattern.pattern.id, "HSL:1055:0:01");

        let entry = &pattern.times[0];
        assert_eq!(entry.scheduled_departure, 61920);
        assert_eq!(entry.departure_at(), 1470171600 + 61980);
        assert_eq!(entry.scheduled_at(), 1470171600 + 61920);
    }

    #[test]
    fn test_realtime_state() {
        let mut entry = StopTimeEntry {
            service_day: 0,
            scheduled_departure: 100,
            realtime_departure: 100,
            departure_delay: 0,
            realtime: false,
            trip_id: "T1".to_string(),
        };
        assert_eq!(entry.realtime_state(), RealtimeState::NotAvailable);

        entry.realtime = true;
        assert_eq!(entry.realtime_state(), RealtimeState::OnTime);

        entry.departure_delay = 60;
        assert_eq!(entry.realtime_state(), RealtimeState::Updated);
    }
}
