//! Candidate events as returned by the provider

use serde::{Deserialize, Serialize};

use super::Demand;

/// Unvalidated event description, before classification and storage
///
/// Field types are checked when the provider response is parsed; whether
/// the required `name` and `date` are present is left to ingestion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawCandidate {
    #[serde(default)]
    pub name: Option<String>,
    /// Calendar day as `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Start time, `HH:MM`
    #[serde(default, alias = "startTime", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "endTime", default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Demand label exactly as the provider wrote it
    #[serde(default)]
    pub demand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RawCandidate {
    /// Candidate with only the required fields set
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            date: Some(date.into()),
            ..Default::default()
        }
    }

    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_demand(mut self, demand: Demand) -> Self {
        self.demand = Some(demand.as_str().to_string());
        self
    }

    pub fn with_time(mut self, start: impl Into<String>) -> Self {
        self.time = Some(start.into());
        self
    }

    pub fn with_end_time(mut self, end: impl Into<String>) -> Self {
        self.end_time = Some(end.into());
        self
    }

    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_from_provider_json() {
        let json = r#"{
            "name": "Jazz Session",
            "location": "Unterfahrt",
            "lat": 48.1351,
            "lng": 11.5820,
            "date": "2025-06-01",
            "time": "21:00",
            "endTime": "23:30",
            "capacity": 250,
            "type": "Jazz",
            "demand": "medium",
            "description": "Late session"
        }"#;

        let candidate: RawCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.name.as_deref(), Some("Jazz Session"));
        assert_eq!(candidate.time.as_deref(), Some("21:00"));
        assert_eq!(candidate.end_time.as_deref(), Some("23:30"));
        assert_eq!(candidate.capacity, Some(250));
        assert_eq!(candidate.demand.as_deref(), Some("medium"));
        assert!(candidate.address.is_none());
    }

    #[test]
    fn test_candidate_nulls_and_missing_fields() {
        let json = r#"{"name": "Open Mic", "date": "2025-06-01", "capacity": null, "demand": null}"#;
        let candidate: RawCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.capacity, None);
        assert_eq!(candidate.demand, None);
    }

    #[test]
    fn test_candidate_keeps_unrecognised_demand_label() {
        let json = r#"{"name": "Rave", "date": "2025-06-01", "demand": "extreme"}"#;
        let candidate: RawCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.demand.as_deref(), Some("extreme"));
    }

    #[test]
    fn test_candidate_rejects_wrong_field_type() {
        let json = r#"{"name": "Messe", "date": "2025-06-01", "capacity": "many"}"#;
        assert!(serde_json::from_str::<RawCandidate>(json).is_err());
    }
}
